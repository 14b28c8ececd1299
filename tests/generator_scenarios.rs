mod common;

use common::{actual_dates, date, entries, modifications, payment_dates, weekend_generator};
use recurrentry::{Recurrentry, RecurrenceError, RecurrentryError};
use serde_json::json;

#[test]
fn monthly_every_month() {
    let data = entries(json!([{
        "id": "1",
        "date": "2024-01-01",
        "config": { "period": "month", "start": "2024-01-01", "interval": 4, "options": { "every": 1 } }
    }]));

    let result = weekend_generator().generate(&data, &[], None).expect("generate");
    assert_eq!(
        actual_dates(&result),
        ["2024-01-01", "2024-02-01", "2024-03-01", "2024-04-01"]
    );
    let indices: Vec<u32> = result.iter().map(|entry| entry.index).collect();
    assert_eq!(indices, [1, 2, 3, 4]);
}

#[test]
fn yearly_third_wednesday_of_june() {
    let data = entries(json!([{
        "id": "1",
        "date": "2024-01-01",
        "config": {
            "period": "year",
            "start": "2024-01-01",
            "interval": 2,
            "options": { "each": [6], "on": "third-wednesday" }
        }
    }]));

    let result = weekend_generator().generate(&data, &[], None).expect("generate");
    assert_eq!(actual_dates(&result), ["2024-06-19", "2025-06-18"]);
}

#[test]
fn deleting_the_rest_inside_an_each_interval() {
    let data = entries(json!([{
        "id": "1",
        "date": "2024-01-01",
        "config": { "period": "month", "start": "2024-01-01", "interval": 3, "options": { "each": [1, 15] } }
    }]));
    let mods = modifications(json!([{
        "itemId": "1",
        "index": 2,
        "payload": { "deleted": true },
        "restPayload": { "deleted": true }
    }]));

    let result = weekend_generator().generate(&data, &mods, None).expect("generate");
    assert_eq!(result.len(), 1);
    assert_eq!(result[0].index, 1);
}

#[test]
fn single_payment_on_a_holiday() {
    let generator = Recurrentry::new(&[6, 7], [date("2024-01-01")]).expect("calendar");
    let data = entries(json!([{
        "id": 1,
        "date": "2024-01-01",
        "config": { "period": "none", "start": "2024-01-01", "options": { "workdaysOnly": "next" } }
    }]));

    let result = generator.generate(&data, &[], None).expect("generate");
    assert_eq!(actual_dates(&result), ["2024-01-01"]);
    assert_eq!(payment_dates(&result), ["2024-01-02"]);
}

#[test]
fn weekly_grace_period_lands_on_saturday() {
    let data = entries(json!([{
        "id": 1,
        "date": "2024-01-01",
        "config": {
            "period": "week",
            "start": "2024-01-01",
            "interval": 1,
            "options": { "gracePeriod": 5, "workdaysOnly": "next" }
        }
    }]));

    let result = weekend_generator().generate(&data, &[], None).expect("generate");
    assert_eq!(actual_dates(&result), ["2024-01-01"]);
    assert_eq!(payment_dates(&result), ["2024-01-08"]);
}

#[test]
fn every_n_months_keeps_the_start_day() {
    let data = entries(json!([{
        "id": 1,
        "date": "2024-01-31",
        "config": { "period": "month", "start": "2024-01-31", "interval": 3, "options": { "every": 2 } }
    }]));

    let result = weekend_generator().generate(&data, &[], None).expect("generate");
    assert_eq!(actual_dates(&result), ["2024-01-31", "2024-03-31", "2024-05-31"]);
}

#[test]
fn month_end_start_clamps_in_short_months() {
    let data = entries(json!([{
        "id": 1,
        "date": "2024-01-31",
        "config": { "period": "month", "start": "2024-01-31", "interval": 3 }
    }]));

    let result = weekend_generator().generate(&data, &[], None).expect("generate");
    assert_eq!(actual_dates(&result), ["2024-01-31", "2024-02-29", "2024-03-31"]);
}

#[test]
fn weekly_every_two_weeks() {
    let data = entries(json!([{
        "id": 1,
        "date": "2024-01-01",
        "config": { "period": "week", "start": "2024-01-01", "interval": 3, "options": { "every": 2 } }
    }]));

    let result = weekend_generator().generate(&data, &[], None).expect("generate");
    assert_eq!(actual_dates(&result), ["2024-01-01", "2024-01-15", "2024-01-29"]);
}

#[test]
fn weekly_on_several_days() {
    let data = entries(json!([{
        "id": 1,
        "date": "2024-01-01",
        "config": { "period": "week", "start": "2024-01-01", "interval": 2, "options": { "each": [5, 1, 3] } }
    }]));

    let result = weekend_generator().generate(&data, &[], None).expect("generate");
    assert_eq!(
        actual_dates(&result),
        ["2024-01-01", "2024-01-03", "2024-01-05", "2024-01-08", "2024-01-10", "2024-01-12"]
    );
    let indices: Vec<u32> = result.iter().map(|entry| entry.index).collect();
    assert_eq!(indices, [1, 2, 3, 4, 5, 6]);
}

#[test]
fn repeated_each_values_take_their_own_indices() {
    let data = entries(json!([{
        "id": 1,
        "date": "2024-01-01",
        "config": { "period": "week", "start": "2024-01-01", "interval": 1, "options": { "each": [3, 1, 3] } }
    }]));
    let mods = modifications(json!([{ "itemId": 1, "index": 3, "payload": { "amount": 5 } }]));

    let result = weekend_generator().generate(&data, &mods, None).expect("generate");
    assert_eq!(actual_dates(&result), ["2024-01-01", "2024-01-03", "2024-01-03"]);
    let indices: Vec<u32> = result.iter().map(|entry| entry.index).collect();
    assert_eq!(indices, [1, 2, 3]);
    assert_eq!(result[1].entry.field("amount"), None);
    assert_eq!(result[2].entry.field("amount"), Some(&json!(5)));
}

#[test]
fn monthly_first_monday() {
    let data = entries(json!([{
        "id": 1,
        "date": "2024-01-01",
        "config": { "period": "month", "start": "2024-01-01", "interval": 3, "options": { "on": "first-monday" } }
    }]));

    let result = weekend_generator().generate(&data, &[], None).expect("generate");
    assert_eq!(actual_dates(&result), ["2024-01-01", "2024-02-05", "2024-03-04"]);
}

#[test]
fn monthly_fifth_monday_skips_months_without_one() {
    let data = entries(json!([{
        "id": 1,
        "date": "2024-01-01",
        "config": { "period": "month", "start": "2024-01-01", "interval": 4, "options": { "on": "fifth-monday" } }
    }]));

    let result = weekend_generator().generate(&data, &[], None).expect("generate");
    assert_eq!(actual_dates(&result), ["2024-01-29", "2024-04-29"]);
    let indices: Vec<u32> = result.iter().map(|entry| entry.index).collect();
    assert_eq!(indices, [1, 2]);
}

#[test]
fn monthly_next_to_last_friday() {
    let data = entries(json!([{
        "id": 1,
        "date": "2024-01-01",
        "config": { "period": "month", "start": "2024-01-01", "interval": 2, "options": { "on": "nextToLast-friday" } }
    }]));

    let result = weekend_generator().generate(&data, &[], None).expect("generate");
    assert_eq!(actual_dates(&result), ["2024-01-19", "2024-02-16"]);
}

#[test]
fn yearly_every_two_years() {
    let data = entries(json!([{
        "id": 1,
        "date": "2024-01-01",
        "config": { "period": "year", "start": "2024-01-01", "interval": 3, "options": { "every": 2 } }
    }]));

    let result = weekend_generator().generate(&data, &[], None).expect("generate");
    assert_eq!(actual_dates(&result), ["2024-01-01", "2026-01-01", "2028-01-01"]);
}

#[test]
fn yearly_on_several_months() {
    let data = entries(json!([{
        "id": 1,
        "date": "2024-01-15",
        "config": { "period": "year", "start": "2024-01-15", "interval": 2, "options": { "each": [9, 3] } }
    }]));

    let result = weekend_generator().generate(&data, &[], None).expect("generate");
    assert_eq!(
        actual_dates(&result),
        ["2024-03-15", "2024-09-15", "2025-03-15", "2025-09-15"]
    );
}

#[test]
fn yearly_last_weekday_of_selected_months() {
    let data = entries(json!([{
        "id": 1,
        "date": "2024-01-01",
        "config": {
            "period": "year",
            "start": "2024-01-01",
            "interval": 1,
            "options": { "each": [1, 2], "on": "last-weekday" }
        }
    }]));

    let result = weekend_generator().generate(&data, &[], None).expect("generate");
    assert_eq!(actual_dates(&result), ["2024-01-31", "2024-02-29"]);
}

#[test]
fn yearly_with_workdays_only() {
    let data = entries(json!([{
        "id": 1,
        "date": "2024-06-01",
        "config": {
            "period": "year",
            "start": "2024-06-01",
            "interval": 2,
            "options": { "workdaysOnly": true }
        }
    }]));

    let result = weekend_generator().generate(&data, &[], None).expect("generate");
    assert_eq!(actual_dates(&result), ["2024-06-01", "2025-06-01"]);
    assert_eq!(payment_dates(&result), ["2024-06-03", "2025-06-02"]);
}

#[test]
fn monthly_previous_workday() {
    let data = entries(json!([{
        "id": 1,
        "date": "2024-06-01",
        "config": {
            "period": "month",
            "start": "2024-06-01",
            "interval": 1,
            "options": { "workdaysOnly": "previous" }
        }
    }]));

    let result = weekend_generator().generate(&data, &[], None).expect("generate");
    assert_eq!(payment_dates(&result), ["2024-05-31"]);
}

#[test]
fn weekend_ordinal_without_weekend_days_fails() {
    let generator = Recurrentry::new(&[], []).expect("calendar");
    let data = entries(json!([{
        "id": 1,
        "date": "2024-01-01",
        "config": { "period": "month", "start": "2024-01-01", "interval": 2, "options": { "on": "first-weekend" } }
    }]));

    let err = generator.generate(&data, &[], None).unwrap_err();
    assert!(matches!(
        err,
        RecurrentryError::Recurrence(RecurrenceError::Configuration(_))
    ));
}

#[test]
fn generated_entries_serialize_with_payload_under_dollar() {
    let data = entries(json!([{
        "id": "rent",
        "date": "2024-01-01",
        "amount": 1200,
        "config": { "period": "month", "start": "2024-01-01", "interval": 1 }
    }]));

    let result = weekend_generator().generate(&data, &[], None).expect("generate");
    let value = serde_json::to_value(&result).expect("serialize");
    assert_eq!(value[0]["$"]["id"], "rent");
    assert_eq!(value[0]["$"]["amount"], 1200);
    assert_eq!(value[0]["index"], 1);
    assert_eq!(value[0]["actualDate"], "2024-01-01");
    assert_eq!(value[0]["paymentDate"], "2024-01-01");
}
