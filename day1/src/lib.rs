use anyhow::{Context, Result};
use itertools::Itertools;
use thiserror::Error;
use tracing::debug;
use util::{parse_nice, parse_number};

#[derive(Error, Debug, PartialEq, Eq)]
pub enum CalorieError {
    #[error("Need at least {needed} elves, found {found}")]
    NotEnoughGroups { needed: usize, found: usize },

    #[error("Calorie total does not fit in 64 bits")]
    Overflow,
}

/// Calories carried by each elf, in the order the elves appear in the input.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct GroupTotals {
    totals: Vec<i64>,
}

impl GroupTotals {
    pub fn len(&self) -> usize {
        self.totals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.totals.is_empty()
    }

    pub fn as_slice(&self) -> &[i64] {
        &self.totals
    }

    /// `(elf index, total)` pairs, biggest total first.
    pub fn ranked(&self) -> Vec<(usize, i64)> {
        self.totals
            .iter()
            .copied()
            .enumerate()
            .sorted_by(|(_, a), (_, b)| b.cmp(a))
            .collect()
    }

    fn top_n(&self, n: usize) -> Result<Vec<(usize, i64)>, CalorieError> {
        let ranked = self.ranked();
        if ranked.len() < n {
            return Err(CalorieError::NotEnoughGroups {
                needed: n,
                found: ranked.len(),
            });
        }

        Ok(ranked.into_iter().take(n).collect())
    }
}

// An elf exists as soon as a line is read while it is the current one, so
// consecutive blank lines yield an elf carrying nothing.
pub fn group_totals(input: impl Iterator<Item = impl Into<String>>) -> Result<GroupTotals> {
    let mut totals: Vec<i64> = Vec::new();
    let mut current = 0;

    for (i, line) in input.enumerate() {
        let line: String = line.into();

        if totals.len() == current {
            totals.push(0);
        }

        if line.is_empty() {
            current += 1;
            continue;
        }

        let calories = parse_nice(&line, parse_number)
            .with_context(|| format!("line {} is not a number of calories", i + 1))?;
        if let Some(total) = totals.last_mut() {
            *total = total
                .checked_add(calories)
                .ok_or(CalorieError::Overflow)
                .with_context(|| format!("line {} overflows its elf's total", i + 1))?;
        }
    }

    debug!(elves = totals.len(), "summed calories");

    Ok(GroupTotals { totals })
}

pub fn top_total(totals: &GroupTotals) -> Result<i64, CalorieError> {
    let top = totals.top_n(1)?;

    debug!(elf = top[0].0 + 1, "top elf");

    Ok(top[0].1)
}

pub fn top_three_total(totals: &GroupTotals) -> Result<i64, CalorieError> {
    let top = totals.top_n(3)?;

    debug!(
        elves = ?top.iter().map(|(i, _)| i + 1).collect::<Vec<_>>(),
        "top three elves"
    );

    top.iter()
        .try_fold(0i64, |sum, (_, total)| sum.checked_add(*total))
        .ok_or(CalorieError::Overflow)
}
