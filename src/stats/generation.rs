use chrono::{Datelike, Utc};
use serde::Serialize;

use crate::error::StatsError;

struct Cohort {
    name: &'static str,
    lower: i32,
    upper: i32,
    summary: &'static str,
}

const COHORTS: [Cohort; 8] = [
    Cohort {
        name: "the Lost Generation",
        lower: 1883,
        upper: 1900,
        summary: "Came of age during the First World War and the Roaring Twenties.",
    },
    Cohort {
        name: "the Greatest Generation",
        lower: 1901,
        upper: 1927,
        summary: "Grew up through the Great Depression and fought in the Second World War.",
    },
    Cohort {
        name: "the Silent Generation",
        lower: 1928,
        upper: 1945,
        summary: "Came of age in the post-war years, the era of the Korean War.",
    },
    Cohort {
        name: "the Baby Boomers",
        lower: 1946,
        upper: 1964,
        summary: "Born into the post-war baby boom; lived through the counterculture of the 1960s.",
    },
    Cohort {
        name: "Generation X",
        lower: 1965,
        upper: 1980,
        summary: "Followed the boomers during a drop in birth rates; grew up with MTV and home computers.",
    },
    Cohort {
        name: "the Millennials",
        lower: 1981,
        upper: 1996,
        summary: "Grew up around the turn of the millennium as the internet went mainstream.",
    },
    Cohort {
        name: "Generation Z",
        lower: 1997,
        upper: 2012,
        summary: "The first cohort raised with smartphones and social media from childhood.",
    },
    Cohort {
        name: "Generation Alpha",
        lower: 2013,
        upper: 2025,
        summary: "Born entirely in the 21st century, following Generation Z.",
    },
];

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Generation {
    pub name: &'static str,
    pub lower: i32,
    pub upper: i32,
    pub summary: &'static str,
    pub year: i32,
    pub age: i32,
}

/// Classifies `year` relative to the current calendar year.
pub fn generation_for_year(year: i32) -> Result<Generation, StatsError> {
    classify(year, Utc::now().year())
}

/// Classifies `year`, computing `age` against `current_year`.
pub fn classify(year: i32, current_year: i32) -> Result<Generation, StatsError> {
    COHORTS
        .iter()
        .find(|c| (c.lower..=c.upper).contains(&year))
        .map(|c| Generation {
            name: c.name,
            lower: c.lower,
            upper: c.upper,
            summary: c.summary,
            year,
            age: current_year - year,
        })
        .ok_or(StatsError::YearOutOfRange(year))
}
