use chrono::NaiveDate;
use renewal_records::RenewalRecord;
use serde::{Deserialize, Serialize};

use crate::date::parse_renewal_date;

/// Time-to-expiration buckets, in presentation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BucketLabel {
    AlreadyExpired,
    WithinSixMonths,
    SixToTwelveMonths,
    OneToTwoYears,
    BeyondTwoYears,
    NoDate,
}

impl BucketLabel {
    /// Declaration order doubles as presentation order.
    pub const ALL: [Self; 6] = [
        Self::AlreadyExpired,
        Self::WithinSixMonths,
        Self::SixToTwelveMonths,
        Self::OneToTwoYears,
        Self::BeyondTwoYears,
        Self::NoDate,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::AlreadyExpired => "Already Expired",
            Self::WithinSixMonths => "Within 6 months",
            Self::SixToTwelveMonths => "6-12 months",
            Self::OneToTwoYears => "1-2 years",
            Self::BeyondTwoYears => "2+ years",
            Self::NoDate => "No date",
        }
    }

    /// Bucket for a date `days` away from the report date. Day 0 (expiring
    /// today) still counts as within six months.
    #[must_use]
    pub const fn from_days(days: i64) -> Self {
        match days {
            i64::MIN..=-1 => Self::AlreadyExpired,
            0..=182 => Self::WithinSixMonths,
            183..=365 => Self::SixToTwelveMonths,
            366..=730 => Self::OneToTwoYears,
            _ => Self::BeyondTwoYears,
        }
    }
}

/// One non-empty timeline bucket.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineBucket {
    pub label: BucketLabel,
    pub item_count: usize,
    pub total_opportunity: f64,
}

/// Bucket records by how far their renewal date sits from `report_date`.
///
/// Unparsable dates land in [`BucketLabel::NoDate`]. Buckets that collected
/// nothing are omitted, and the result follows [`BucketLabel::ALL`] order
/// rather than being sorted by value.
pub fn expiration_timeline<'a>(
    records: impl IntoIterator<Item = &'a dyn RenewalRecord>,
    report_date: NaiveDate,
) -> Vec<TimelineBucket> {
    let mut slots = [(0usize, 0.0f64); BucketLabel::ALL.len()];

    for record in records {
        let label = match parse_renewal_date(record.renewal_date()) {
            Some(date) => BucketLabel::from_days((date - report_date).num_days()),
            None => BucketLabel::NoDate,
        };
        let slot = &mut slots[label as usize];
        slot.0 += 1;
        slot.1 += record.opportunity();
    }

    BucketLabel::ALL
        .into_iter()
        .zip(slots)
        .filter(|&(_, (count, _))| count > 0)
        .map(|(label, (item_count, total_opportunity))| TimelineBucket {
            label,
            item_count,
            total_opportunity,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use renewal_records::{HardwareRenewal, ItemStatus};

    const REPORT: &str = "2026-01-01";

    fn report_date() -> NaiveDate {
        NaiveDate::parse_from_str(REPORT, "%Y-%m-%d").unwrap()
    }

    fn hw(row: usize, ldos: &str, opportunity: f64) -> HardwareRenewal {
        HardwareRenewal {
            row,
            customer: "Acme".into(),
            country: String::new(),
            product_id: String::new(),
            description: String::new(),
            architecture: String::new(),
            sub_architecture: String::new(),
            quantity: 1,
            opportunity,
            ldos: ldos.into(),
            status: ItemStatus::Unset,
        }
    }

    fn timeline(items: &[HardwareRenewal]) -> Vec<TimelineBucket> {
        expiration_timeline(items.iter().map(|i| i as &dyn RenewalRecord), report_date())
    }

    fn offset(days: i64) -> String {
        (report_date() + chrono::Duration::days(days))
            .format("%Y-%m-%d")
            .to_string()
    }

    #[test]
    fn boundary_days_land_in_the_right_buckets() {
        let cases = [
            (-1, BucketLabel::AlreadyExpired),
            (0, BucketLabel::WithinSixMonths),
            (182, BucketLabel::WithinSixMonths),
            (183, BucketLabel::SixToTwelveMonths),
            (365, BucketLabel::SixToTwelveMonths),
            (366, BucketLabel::OneToTwoYears),
            (730, BucketLabel::OneToTwoYears),
            (731, BucketLabel::BeyondTwoYears),
        ];
        for (days, expected) in cases {
            assert_eq!(BucketLabel::from_days(days), expected, "day offset {days}");
            let out = timeline(&[hw(0, &offset(days), 10.0)]);
            assert_eq!(out.len(), 1);
            assert_eq!(out[0].label, expected, "day offset {days}");
        }
    }

    #[test]
    fn unparsable_dates_fall_into_no_date() {
        let out = timeline(&[hw(0, "TBD", 5.0), hw(1, "", 7.0)]);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].label, BucketLabel::NoDate);
        assert_eq!(out[0].item_count, 2);
        assert_eq!(out[0].total_opportunity, 12.0);
    }

    #[test]
    fn empty_buckets_are_omitted_and_order_is_fixed() {
        let items = vec![
            hw(0, &offset(800), 1.0),
            hw(1, &offset(-30), 2.0),
            hw(2, "junk", 3.0),
        ];
        let labels: Vec<_> = timeline(&items).into_iter().map(|b| b.label).collect();
        assert_eq!(
            labels,
            vec![
                BucketLabel::AlreadyExpired,
                BucketLabel::BeyondTwoYears,
                BucketLabel::NoDate,
            ]
        );
    }

    #[test]
    fn bucket_counts_conserve_records() {
        let items = vec![
            hw(0, &offset(10), 1.0),
            hw(1, &offset(200), 1.0),
            hw(2, &offset(400), 1.0),
            hw(3, "nope", 1.0),
        ];
        let total: usize = timeline(&items).iter().map(|b| b.item_count).sum();
        assert_eq!(total, items.len());
    }
}
