//! nom grammar for the geometric literal forms
//!
//! Every shape is a comma-separated list of numbers grouped into `(x,y)`
//! pairs, optionally wrapped in `[]`, `()`, `<>` or `{}`. Whitespace is
//! allowed around every token.

use nom::{
    IResult,
    branch::alt,
    bytes::complete::tag_no_case,
    character::complete::{char, multispace0},
    combinator::{all_consuming, map, map_res, opt, recognize},
    multi::separated_list1,
    number::complete::recognize_float,
    sequence::{delimited, pair, separated_pair, terminated, tuple},
};

use crate::issue::Issue;

/// Outer delimiter of a point list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Enclosure {
    Brackets,
    Parens,
    Bare,
}

pub(crate) type Coords = (f64, f64);

fn padded<'a, O, F>(inner: F) -> impl FnMut(&'a str) -> IResult<&'a str, O>
where
    F: FnMut(&'a str) -> IResult<&'a str, O>,
{
    delimited(multispace0, inner, multispace0)
}

fn symbol<'a>(c: char) -> impl FnMut(&'a str) -> IResult<&'a str, char> {
    padded(char(c))
}

/// Float literal, including `NaN` and signed `Infinity`
pub(crate) fn number(input: &str) -> IResult<&str, f64> {
    padded(map_res(
        alt((
            recognize(pair(
                opt(alt((char('+'), char('-')))),
                alt((tag_no_case("infinity"), tag_no_case("inf"), tag_no_case("nan"))),
            )),
            recognize_float,
        )),
        |text: &str| text.to_ascii_lowercase().parse::<f64>(),
    ))(input)
}

fn coords(input: &str) -> IResult<&str, Coords> {
    separated_pair(number, char(','), number)(input)
}

/// `(x,y)` or `x,y`
pub(crate) fn point(input: &str) -> IResult<&str, Coords> {
    alt((delimited(symbol('('), coords, symbol(')')), coords))(input)
}

fn point_list(input: &str) -> IResult<&str, Vec<Coords>> {
    separated_list1(char(','), point)(input)
}

/// `[(x,y),...]`, `((x,y),...)`, `(x,y),...` or `x,y,...`
pub(crate) fn enclosed_points(input: &str) -> IResult<&str, (Enclosure, Vec<Coords>)> {
    alt((
        all_consuming(map(delimited(symbol('['), point_list, symbol(']')), |p| {
            (Enclosure::Brackets, p)
        })),
        all_consuming(map(delimited(symbol('('), point_list, symbol(')')), |p| {
            (Enclosure::Parens, p)
        })),
        all_consuming(map(point_list, |p| (Enclosure::Bare, p))),
    ))(input)
}

fn circle_body(input: &str) -> IResult<&str, (Coords, f64)> {
    separated_pair(point, char(','), number)(input)
}

/// `<(x,y),r>`, `((x,y),r)`, `(x,y),r` or `x,y,r`
pub(crate) fn circle(input: &str) -> IResult<&str, (Coords, f64)> {
    alt((
        all_consuming(delimited(symbol('<'), circle_body, symbol('>'))),
        all_consuming(delimited(symbol('('), circle_body, symbol(')'))),
        all_consuming(circle_body),
    ))(input)
}

/// `{a,b,c}`
pub(crate) fn line_coefficients(input: &str) -> IResult<&str, (f64, f64, f64)> {
    all_consuming(delimited(
        symbol('{'),
        tuple((
            terminated(number, char(',')),
            terminated(number, char(',')),
            number,
        )),
        symbol('}'),
    ))(input)
}

/// Run a grammar over the whole of `text`
pub(crate) fn run<'a, O>(
    parser: impl FnMut(&'a str) -> IResult<&'a str, O>,
    text: &'a str,
    expected: &'static str,
) -> Result<O, Issue> {
    all_consuming(parser)(text)
        .map(|(_, value)| value)
        .map_err(|_| Issue::invalid_string(expected, text))
}
