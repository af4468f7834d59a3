use std::str::FromStr;

use anyhow::{Context, Result};
use nom::{
    character::complete::{anychar, char},
    combinator::{map, map_res, recognize},
    sequence::separated_pair,
};
use strum::EnumCount;
use strum_macros::{Display, EnumCount, EnumIter, EnumString};
use thiserror::Error;
use tracing::debug;
use util::{parse_nice, ParseResult, Span};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Lose,
    Draw,
    Win,
}

impl Outcome {
    pub fn value(self) -> u32 {
        match self {
            Self::Lose => 0,
            Self::Draw => 3,
            Self::Win => 6,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    Rock,
    Paper,
    Scissors,
}

impl Shape {
    pub fn value(self) -> u32 {
        match self {
            Self::Rock => 1,
            Self::Paper => 2,
            Self::Scissors => 3,
        }
    }

    /// What playing `self` against `other` gets you.
    pub fn against(self, other: Self) -> Outcome {
        match (self, other) {
            (Self::Rock, Self::Scissors)
            | (Self::Scissors, Self::Paper)
            | (Self::Paper, Self::Rock) => Outcome::Win,
            (s1, s2) if s1 == s2 => Outcome::Draw,
            _ => Outcome::Lose,
        }
    }

    /// The shape to play against `other` to end up with `outcome`.
    pub fn reaching(other: Self, outcome: Outcome) -> Self {
        match (other, outcome) {
            (s, Outcome::Draw) => s,
            (Self::Rock, Outcome::Lose) | (Self::Paper, Outcome::Win) => Self::Scissors,
            (Self::Paper, Outcome::Lose) | (Self::Scissors, Outcome::Win) => Self::Rock,
            (Self::Scissors, Outcome::Lose) | (Self::Rock, Outcome::Win) => Self::Paper,
        }
    }
}

/// First column of the strategy guide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, EnumCount, EnumIter)]
pub enum Opponent {
    A,
    B,
    C,
}

impl Opponent {
    pub fn shape(self) -> Shape {
        match self {
            Self::A => Shape::Rock,
            Self::B => Shape::Paper,
            Self::C => Shape::Scissors,
        }
    }
}

/// Second column of the strategy guide, read either as the shape to play
/// or, once the secret code is known, as the outcome to aim for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, EnumCount, EnumIter)]
pub enum Response {
    X,
    Y,
    Z,
}

impl Response {
    pub fn shape(self) -> Shape {
        match self {
            Self::X => Shape::Rock,
            Self::Y => Shape::Paper,
            Self::Z => Shape::Scissors,
        }
    }

    pub fn outcome(self) -> Outcome {
        match self {
            Self::X => Outcome::Lose,
            Self::Y => Outcome::Draw,
            Self::Z => Outcome::Win,
        }
    }

    fn from_shape(shape: Shape) -> Self {
        match shape {
            Shape::Rock => Self::X,
            Shape::Paper => Self::Y,
            Shape::Scissors => Self::Z,
        }
    }
}

// shape value plus outcome value, rows A B C, columns X Y Z
pub const SCORE_TABLE: [[u32; Response::COUNT]; Opponent::COUNT] = [
    [4, 8, 3],
    [1, 5, 9],
    [7, 2, 6],
];

pub fn score(opponent: Opponent, response: Response) -> u32 {
    SCORE_TABLE[opponent as usize][response as usize]
}

/// Response to play against `opponent` so that the round ends the way the
/// secret code `code` asks for.
pub fn wanted_response(opponent: Opponent, code: Response) -> Response {
    Response::from_shape(Shape::reaching(opponent.shape(), code.outcome()))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Round {
    pub opponent: Opponent,
    pub response: Response,
}

impl Round {
    pub fn literal_score(&self) -> u32 {
        score(self.opponent, self.response)
    }

    pub fn adjusted_score(&self) -> u32 {
        score(self.opponent, wanted_response(self.opponent, self.response))
    }
}

#[derive(Error, Debug)]
#[error("Unable to parse round\n{0}")]
pub struct RoundParseError(String);

fn parse_token<T>(i: Span<'_>) -> ParseResult<'_, T>
where
    T: FromStr<Err = strum::ParseError>,
{
    map_res(recognize(anychar), |c: Span| c.fragment().parse::<T>())(i)
}

fn parse_round(i: Span<'_>) -> ParseResult<'_, Round> {
    map(
        separated_pair(parse_token::<Opponent>, char(' '), parse_token::<Response>),
        |(opponent, response)| Round { opponent, response },
    )(i)
}

impl FromStr for Round {
    type Err = RoundParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_nice(s, parse_round).map_err(|e| RoundParseError(e.to_string()))
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Scores {
    pub literal: u32,
    pub adjusted: u32,
}

pub fn total_scores(input: impl Iterator<Item = impl Into<String>>) -> Result<Scores> {
    let mut scores = Scores::default();
    let mut rounds = 0;

    for (i, line) in input.enumerate() {
        let line: String = line.into();
        let round: Round = line
            .parse()
            .with_context(|| format!("line {} is not a round", i + 1))?;

        scores.literal += round.literal_score();
        scores.adjusted += round.adjusted_score();
        rounds += 1;
    }

    debug!(rounds, "played");

    Ok(scores)
}
