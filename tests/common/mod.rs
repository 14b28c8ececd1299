#![allow(dead_code)]

use chrono::NaiveDate;
use recurrentry::{Entry, GeneratedEntry, Modification, Recurrentry};
use serde_json::Value;

pub fn date(value: &str) -> NaiveDate {
    recurrentry::parse_date(value).expect("valid date")
}

/// Generator with a Saturday/Sunday weekend and no holidays.
pub fn weekend_generator() -> Recurrentry {
    Recurrentry::new(&[6, 7], []).expect("weekend calendar")
}

pub fn entries(json: Value) -> Vec<Entry> {
    serde_json::from_value(json).expect("entries deserialize")
}

pub fn modifications(json: Value) -> Vec<Modification> {
    serde_json::from_value(json).expect("modifications deserialize")
}

pub fn actual_dates(generated: &[GeneratedEntry]) -> Vec<String> {
    generated
        .iter()
        .map(|entry| entry.actual_date.to_string())
        .collect()
}

pub fn payment_dates(generated: &[GeneratedEntry]) -> Vec<String> {
    generated
        .iter()
        .map(|entry| entry.payment_date.to_string())
        .collect()
}
