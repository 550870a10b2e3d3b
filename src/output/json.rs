use serde_json::{Map, Value, json};

use crate::consts::DATE_FORMAT;
use crate::output::format::{MONTH_NAMES, WEEKDAY_NAMES};
use crate::stats::{Mean, OccupancySummary, place_name};

fn bucket_json(names: &[&str], buckets: &[Mean], key: &str) -> Vec<Value> {
    names
        .iter()
        .zip(buckets)
        .map(|(name, mean)| {
            let mut entry = Map::new();
            entry.insert(key.to_string(), json!(name));
            entry.insert("average".to_string(), json!(mean.value()));
            entry.insert("samples".to_string(), json!(mean.count));
            Value::Object(entry)
        })
        .collect()
}

/// Summary as pretty JSON; averages are 0..1 fractions
pub(crate) fn output_summary_json(summary: &OccupancySummary) -> String {
    let evolution: Vec<Value> = summary
        .evolution
        .iter()
        .map(|day| {
            json!({
                "date": day.date.format(DATE_FORMAT).to_string(),
                "average": day.mean.value(),
                "samples": day.mean.count,
            })
        })
        .collect();

    let output = json!({
        "place": summary.place,
        "place_name": place_name(summary.place),
        "average": summary.total.value(),
        "samples": summary.total.count,
        "skipped_records": summary.skipped_records,
        "weekday": bucket_json(&WEEKDAY_NAMES, &summary.weekday, "weekday"),
        "month": bucket_json(&MONTH_NAMES, &summary.month, "month"),
        "evolution_days": summary.days,
        "evolution": evolution,
    });

    serde_json::to_string_pretty(&output).unwrap_or_else(|_| "{}".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::{SummaryQuery, summarize};
    use crate::store::Record;

    #[test]
    fn summary_json_shape() {
        let history = vec![Record::new(
            "2024-01-08T10:00:00+01:00",
            json!([{"IdRecinto": 4, "Ocupacion": 25, "Aforo": 100}]),
        )];
        let query = SummaryQuery::new(4, &[], 30).unwrap();
        let now = "2024-01-10T12:00:00Z".parse().unwrap();
        let summary = summarize(&history, &query, now);

        let parsed: Value = serde_json::from_str(&output_summary_json(&summary)).unwrap();
        assert_eq!(parsed["place"], 4);
        assert_eq!(parsed["place_name"], "Legazpi Principal");
        assert_eq!(parsed["average"].as_f64(), Some(0.25));
        assert_eq!(parsed["samples"], 1);
        assert_eq!(parsed["weekday"].as_array().unwrap().len(), 7);
        assert_eq!(parsed["weekday"][0]["weekday"], "Mon");
        assert_eq!(parsed["weekday"][0]["samples"], 1);
        assert_eq!(parsed["month"].as_array().unwrap().len(), 12);
        assert_eq!(parsed["evolution"][0]["date"], "2024-01-08");
    }

    #[test]
    fn unknown_place_name_is_null() {
        let query = SummaryQuery::new(9, &[], 7).unwrap();
        let summary = summarize(&[], &query, chrono::Utc::now());
        let parsed: Value = serde_json::from_str(&output_summary_json(&summary)).unwrap();
        assert!(parsed["place_name"].is_null());
        assert_eq!(parsed["average"].as_f64(), Some(0.0));
    }
}
