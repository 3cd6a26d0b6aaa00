use crate::formats::BlogRecord;

/// Most recent first. Stable, so posts sharing a date keep file order.
pub fn newest_first(records: &mut [BlogRecord]) {
    records.sort_by(|a, b| b.date.at.cmp(&a.date.at));
}
