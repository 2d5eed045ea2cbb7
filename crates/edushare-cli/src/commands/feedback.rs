//! Feedback command: ratings other users left on the viewer's uploads.
//!
//! The backend has no single endpoint for this, so the view is assembled
//! client-side: one ratings fetch per upload, merged and summarized.

use crate::error::{CliError, Result};
use crate::output::Formatter;
use edushare_domain::ResourceId;
use edushare_sdk::{EduShareClient, RatingRecord};
use tracing::warn;

/// Aggregate statistics over the ratings a user's uploads received.
#[derive(Debug, PartialEq)]
pub struct FeedbackSummary {
    /// Total number of ratings received.
    pub total: usize,
    /// Mean star value across all ratings.
    pub average: f64,
    /// Best-rated upload: title and its average.
    pub highest: Option<(String, f64)>,
    /// Worst-rated upload: title and its average. Only uploads with more
    /// than one rating qualify, a single bad review is not a trend.
    pub lowest: Option<(String, f64)>,
}

/// Summarize received ratings per upload and overall.
pub fn summarize(ratings: &[RatingRecord]) -> FeedbackSummary {
    if ratings.is_empty() {
        return FeedbackSummary {
            total: 0,
            average: 0.0,
            highest: None,
            lowest: None,
        };
    }

    let total = ratings.len();
    let sum: u64 = ratings.iter().map(|r| u64::from(r.rating)).sum();
    let average = sum as f64 / total as f64;

    let mut per_resource: Vec<(String, u64, usize)> = Vec::new();
    for r in ratings {
        match per_resource.iter_mut().find(|(title, _, _)| *title == r.resource_title) {
            Some((_, sum, count)) => {
                *sum += u64::from(r.rating);
                *count += 1;
            }
            None => per_resource.push((r.resource_title.clone(), u64::from(r.rating), 1)),
        }
    }

    let mut highest: Option<(String, f64)> = None;
    let mut lowest: Option<(String, f64)> = None;
    for (title, sum, count) in &per_resource {
        let avg = *sum as f64 / *count as f64;
        if highest.as_ref().map_or(true, |(_, best)| avg > *best) {
            highest = Some((title.clone(), avg));
        }
        if *count > 1 && lowest.as_ref().map_or(true, |(_, worst)| avg < *worst) {
            lowest = Some((title.clone(), avg));
        }
    }

    FeedbackSummary {
        total,
        average,
        highest,
        lowest,
    }
}

/// Execute the feedback command: all ratings received on the viewer's
/// uploads, newest first, with summary statistics.
pub async fn execute_feedback(client: &EduShareClient, formatter: &Formatter) -> Result<()> {
    let viewer = client.session().ok_or(CliError::NotLoggedIn)?.viewer();
    let uploads = client.user_resources(viewer).await?;

    let mut received: Vec<RatingRecord> = Vec::new();
    for upload in &uploads {
        match client.resource_ratings(ResourceId::new(upload.id)).await {
            Ok(mut ratings) => {
                for rating in &mut ratings {
                    rating.resource_title = upload.title.clone();
                }
                received.extend(ratings);
            }
            // One unreadable upload should not blank the whole view.
            Err(e) => warn!(resource = upload.id, error = %e, "could not fetch ratings"),
        }
    }
    received.sort_by(|a, b| b.created_at.cmp(&a.created_at));

    let summary = summarize(&received);
    println!(
        "{}",
        formatter.info(&format!(
            "Feedback received: {} rating(s), {:.1} average",
            summary.total, summary.average
        ))
    );
    if let Some((title, avg)) = &summary.highest {
        println!("{}", formatter.info(&format!("Highest rated: {} ({:.1})", title, avg)));
    }
    if let Some((title, avg)) = &summary.lowest {
        println!("{}", formatter.info(&format!("Lowest rated: {} ({:.1})", title, avg)));
    }
    println!("{}", formatter.format_ratings(&received)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rating(id: i64, title: &str, stars: u8) -> RatingRecord {
        serde_json::from_value(serde_json::json!({
            "id": id,
            "user": "bob",
            "resource": 1,
            "resource_title": title,
            "rating": stars,
        }))
        .unwrap()
    }

    #[test]
    fn test_summarize_empty() {
        let summary = summarize(&[]);
        assert_eq!(summary.total, 0);
        assert_eq!(summary.average, 0.0);
        assert!(summary.highest.is_none());
        assert!(summary.lowest.is_none());
    }

    #[test]
    fn test_summarize_overall_average() {
        let ratings = vec![
            rating(1, "Fractions", 5),
            rating(2, "Fractions", 4),
            rating(3, "Decimals", 3),
        ];
        let summary = summarize(&ratings);
        assert_eq!(summary.total, 3);
        assert!((summary.average - 4.0).abs() < f64::EPSILON);
        assert_eq!(summary.highest, Some(("Fractions".to_string(), 4.5)));
    }

    #[test]
    fn test_lowest_needs_more_than_one_rating() {
        // A single one-star review must not mark an upload as lowest rated.
        let ratings = vec![
            rating(1, "Fractions", 4),
            rating(2, "Fractions", 4),
            rating(3, "Decimals", 1),
        ];
        let summary = summarize(&ratings);
        assert_eq!(summary.lowest, Some(("Fractions".to_string(), 4.0)));

        let ratings = vec![
            rating(1, "Fractions", 4),
            rating(2, "Fractions", 2),
            rating(3, "Decimals", 1),
        ];
        let summary = summarize(&ratings);
        assert_eq!(summary.lowest, Some(("Fractions".to_string(), 3.0)));
    }
}
