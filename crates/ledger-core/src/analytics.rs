//! # Analytics Aggregator
//!
//! Buckets invoice history into revenue rollups for the dashboard.
//!
//! ## Windows
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  now = 2024-03-09 14:00 (local calendar)                                │
//! │                                                                         │
//! │  last year      [2023-01-01 00:00, 2024-01-01 00:00)                    │
//! │  current year   [2024-01-01 00:00, now]                                 │
//! │  last month     [2024-02-01 00:00, 2024-03-01 00:00)                    │
//! │  current month  [2024-03-01 00:00, now]                                 │
//! │                                                                         │
//! │  monthly series: Apr'23 May'23 ... Feb'24 Mar'24  (12 entries)          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Calendar boundaries are taken in the time zone of `now`. Invoice dates are
//! stored in UTC and converted before bucketing, so a shop running on local
//! time sees sales land in the month the till showed.
//!
//! Sums are plain `f64` accumulation of the stored totals.

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, TimeZone, Utc};

use crate::types::{AnalyticsReport, Customer, InvoiceHeader, MonthlyRevenue, Product};
use crate::MONTHLY_REVENUE_MONTHS;

// =============================================================================
// Calendar Helpers
// =============================================================================

/// A calendar month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct YearMonth {
    pub year: i32,
    /// 1-12.
    pub month: u32,
}

impl YearMonth {
    /// Month containing `at`.
    pub fn of(at: &NaiveDateTime) -> Self {
        YearMonth {
            year: at.year(),
            month: at.month(),
        }
    }

    /// Shifts by `delta` months, rolling the year over as needed.
    ///
    /// ```rust
    /// use ledger_core::analytics::YearMonth;
    ///
    /// let jan = YearMonth { year: 2024, month: 1 };
    /// assert_eq!(jan.offset(-1), YearMonth { year: 2023, month: 12 });
    /// ```
    pub fn offset(self, delta: i32) -> Self {
        let index = self.year * 12 + (self.month as i32 - 1) + delta;
        YearMonth {
            year: index.div_euclid(12),
            month: index.rem_euclid(12) as u32 + 1,
        }
    }

    /// Midnight on the first day of the month.
    pub fn first_instant(self) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(self.year, self.month, 1)
            .and_then(|d| d.and_hms_opt(0, 0, 0))
            .unwrap_or(NaiveDateTime::MIN)
    }

    /// Short month name (`Jan` .. `Dec`).
    pub fn short_name(self) -> String {
        self.first_instant().format("%b").to_string()
    }
}

/// A half-open or closed interval of local times.
#[derive(Debug, Clone, Copy)]
struct Window {
    start: NaiveDateTime,
    end: NaiveDateTime,
    end_inclusive: bool,
}

impl Window {
    fn contains(&self, at: &NaiveDateTime) -> bool {
        *at >= self.start
            && if self.end_inclusive {
                *at <= self.end
            } else {
                *at < self.end
            }
    }
}

/// The four revenue windows anchored on `now`.
#[derive(Debug, Clone, Copy)]
struct Windows {
    current_month: Window,
    last_month: Window,
    current_year: Window,
    last_year: Window,
}

impl Windows {
    fn anchored_on(now: NaiveDateTime) -> Self {
        let this_month = YearMonth::of(&now);
        let this_year = YearMonth {
            year: this_month.year,
            month: 1,
        };

        let current_month_start = this_month.first_instant();
        let current_year_start = this_year.first_instant();

        Windows {
            current_month: Window {
                start: current_month_start,
                end: now,
                end_inclusive: true,
            },
            last_month: Window {
                start: this_month.offset(-1).first_instant(),
                end: current_month_start,
                end_inclusive: false,
            },
            current_year: Window {
                start: current_year_start,
                end: now,
                end_inclusive: true,
            },
            last_year: Window {
                start: this_year.offset(-12).first_instant(),
                end: current_year_start,
                end_inclusive: false,
            },
        }
    }
}

// =============================================================================
// Aggregation
// =============================================================================

/// Computes the dashboard report from full scans of the three tables.
///
/// `now` fixes both the anchor instant and the calendar (time zone) used for
/// month/year boundaries.
pub fn compute_analytics<Tz: TimeZone>(
    invoices: &[InvoiceHeader],
    customers: &[Customer],
    products: &[Product],
    now: &DateTime<Tz>,
) -> AnalyticsReport {
    let tz = now.timezone();
    let local = |at: &DateTime<Utc>| at.with_timezone(&tz).naive_local();

    let local_now = now.naive_local();
    let windows = Windows::anchored_on(local_now);

    let this_month = YearMonth::of(&local_now);
    // Index 0 is the current month, index 11 the oldest.
    let months: Vec<YearMonth> = (0..MONTHLY_REVENUE_MONTHS as i32)
        .map(|i| this_month.offset(-i))
        .collect();
    let mut monthly = vec![0.0_f64; months.len()];

    let mut report = AnalyticsReport {
        current_month_revenue: 0.0,
        last_month_revenue: 0.0,
        current_year_revenue: 0.0,
        last_year_revenue: 0.0,
        total_customers: customers.len(),
        new_customers_this_month: 0,
        total_products: products.len(),
        monthly_revenue: Vec::with_capacity(months.len()),
    };

    for invoice in invoices {
        let at = local(&invoice.date);

        if windows.current_month.contains(&at) {
            report.current_month_revenue += invoice.total;
        }
        if windows.last_month.contains(&at) {
            report.last_month_revenue += invoice.total;
        }
        if windows.current_year.contains(&at) {
            report.current_year_revenue += invoice.total;
        }
        if windows.last_year.contains(&at) {
            report.last_year_revenue += invoice.total;
        }

        let bucket = YearMonth::of(&at);
        if let Some(slot) = months.iter().position(|m| *m == bucket) {
            monthly[slot] += invoice.total;
        }
    }

    report.new_customers_this_month = customers
        .iter()
        .filter(|c| windows.current_month.contains(&local(&c.created_at)))
        .count();

    report.monthly_revenue = months
        .iter()
        .zip(monthly)
        .rev()
        .map(|(month, revenue)| MonthlyRevenue {
            month: month.short_name(),
            revenue,
        })
        .collect();

    report
}

// =============================================================================
// Unit Tests
// =============================================================================
