//! Output formatting for the CLI.

use crate::config::OutputFormat;
use crate::error::Result;
use colored::*;
use edushare_domain::RelationshipState;
use edushare_sdk::{ConnectionEntry, DownloadRecord, RatingRecord, ResourceRecord, UserProfile};
use tabled::{
    builder::Builder,
    settings::{object::Rows, Alignment, Modify, Style},
};

/// Output formatter.
pub struct Formatter {
    format: OutputFormat,
    color_enabled: bool,
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(format: OutputFormat, color_enabled: bool) -> Self {
        Self {
            format,
            color_enabled,
        }
    }

    /// Format an educator list annotated with relationship states.
    pub fn format_educators(
        &self,
        educators: &[(UserProfile, RelationshipState)],
    ) -> Result<String> {
        match self.format {
            OutputFormat::Json => {
                let values: Vec<serde_json::Value> = educators
                    .iter()
                    .map(|(u, state)| {
                        serde_json::json!({
                            "id": u.id,
                            "username": u.username,
                            "institution": u.institution,
                            "total_uploads": u.total_uploads,
                            "average_rating": u.average_rating,
                            "relationship": state.as_str(),
                            "friendship_id": state.friendship_id().map(|id| id.value()),
                        })
                    })
                    .collect();
                Ok(serde_json::to_string_pretty(&values)?)
            }
            OutputFormat::Quiet => Ok(educators
                .iter()
                .map(|(u, _)| u.id.to_string())
                .collect::<Vec<_>>()
                .join("\n")),
            OutputFormat::Table => {
                if educators.is_empty() {
                    return Ok(self.colorize("No educators found.", "yellow"));
                }

                let mut builder = Builder::default();
                builder.push_record(["ID", "Username", "Institution", "Uploads", "Rating", "Relationship"]);
                for (u, state) in educators {
                    builder.push_record([
                        u.id.to_string(),
                        u.username.clone(),
                        u.institution.clone(),
                        u.total_uploads.to_string(),
                        stars(u.average_rating),
                        state.as_str().to_string(),
                    ]);
                }
                Ok(self.build_table(builder))
            }
        }
    }

    /// Format one connection list.
    pub fn format_connections(&self, title: &str, entries: &[ConnectionEntry]) -> Result<String> {
        match self.format {
            OutputFormat::Json => {
                let values: Vec<serde_json::Value> = entries
                    .iter()
                    .map(|e| {
                        serde_json::json!({
                            "request_id": e.friendship.id.value(),
                            "user_id": e.counterpart.value(),
                            "username": e.user.as_ref().map(|u| u.username.clone()),
                            "institution": e.user.as_ref().map(|u| u.institution.clone()),
                            "status": e.friendship.status.as_str(),
                        })
                    })
                    .collect();
                Ok(serde_json::to_string_pretty(&values)?)
            }
            OutputFormat::Quiet => Ok(entries
                .iter()
                .map(|e| e.friendship.id.to_string())
                .collect::<Vec<_>>()
                .join("\n")),
            OutputFormat::Table => {
                if entries.is_empty() {
                    return Ok(self.colorize(&format!("{}: none", title), "yellow"));
                }

                let mut builder = Builder::default();
                builder.push_record(["Request", "User", "Username", "Institution"]);
                for e in entries {
                    // Missing profile falls back to the bare id.
                    let username = e
                        .user
                        .as_ref()
                        .map(|u| u.username.clone())
                        .unwrap_or_else(|| format!("user #{}", e.counterpart));
                    let institution = e
                        .user
                        .as_ref()
                        .map(|u| u.institution.clone())
                        .unwrap_or_default();
                    builder.push_record([
                        e.friendship.id.to_string(),
                        e.counterpart.to_string(),
                        username,
                        institution,
                    ]);
                }
                Ok(format!("{}\n{}", self.colorize(title, "cyan"), self.build_table(builder)))
            }
        }
    }

    /// Format a resource list.
    pub fn format_resources(&self, resources: &[ResourceRecord]) -> Result<String> {
        match self.format {
            OutputFormat::Json => {
                let values: Vec<serde_json::Value> = resources
                    .iter()
                    .map(|r| {
                        serde_json::json!({
                            "id": r.id,
                            "title": r.title,
                            "author": r.user,
                            "type": r.resource_type,
                            "subject": r.subject,
                            "grade_level": r.grade_level,
                            "downloads": r.download_count,
                            "average_rating": r.average_rating,
                        })
                    })
                    .collect();
                Ok(serde_json::to_string_pretty(&values)?)
            }
            OutputFormat::Quiet => Ok(resources
                .iter()
                .map(|r| r.id.to_string())
                .collect::<Vec<_>>()
                .join("\n")),
            OutputFormat::Table => {
                if resources.is_empty() {
                    return Ok(self.colorize("No resources found.", "yellow"));
                }

                let mut builder = Builder::default();
                builder.push_record(["ID", "Title", "Author", "Type", "Subject", "Grade", "Downloads", "Rating"]);
                for r in resources {
                    builder.push_record([
                        r.id.to_string(),
                        r.title.clone(),
                        r.user.clone(),
                        r.resource_type.clone(),
                        r.subject.clone(),
                        r.grade_level.clone(),
                        r.download_count.to_string(),
                        stars(r.average_rating),
                    ]);
                }
                Ok(self.build_table(builder))
            }
        }
    }

    /// Format a single resource in detail.
    pub fn format_resource(&self, r: &ResourceRecord) -> Result<String> {
        if matches!(self.format, OutputFormat::Json) {
            return self.format_resources(std::slice::from_ref(r));
        }

        let mut out = String::new();
        out.push_str(&self.colorize(&r.title, "cyan"));
        out.push('\n');
        out.push_str(&format!(
            "by {} | {} | {} | grade {}\n",
            r.user, r.resource_type, r.subject, r.grade_level
        ));
        out.push_str(&format!(
            "{} {} download(s)\n",
            stars(r.average_rating),
            r.download_count
        ));
        if !r.description.is_empty() {
            out.push('\n');
            out.push_str(&r.description);
            out.push('\n');
        }
        Ok(out)
    }

    /// Format a user profile card.
    pub fn format_profile(&self, u: &UserProfile, state: Option<RelationshipState>) -> Result<String> {
        if matches!(self.format, OutputFormat::Json) {
            let value = serde_json::json!({
                "id": u.id,
                "username": u.username,
                "institution": u.institution,
                "bio": u.bio,
                "is_private": u.is_private,
                "total_uploads": u.total_uploads,
                "average_rating": u.average_rating,
                "friend_count": u.friend_count,
                "date_joined": u.date_joined,
                "relationship": state.map(|s| s.as_str()),
            });
            return Ok(serde_json::to_string_pretty(&value)?);
        }

        let mut out = String::new();
        out.push_str(&self.colorize(&u.username, "cyan"));
        if u.is_private {
            out.push_str(&self.colorize(" (private)", "yellow"));
        }
        out.push('\n');
        if !u.institution.is_empty() {
            out.push_str(&u.institution);
            out.push('\n');
        }
        out.push_str(&format!(
            "{} upload(s) | {} connection(s) | {}\n",
            u.total_uploads,
            u.friend_count,
            stars(u.average_rating)
        ));
        if let Some(state) = state {
            out.push_str(&format!("relationship: {}\n", state.as_str()));
        }
        if !u.bio.is_empty() {
            out.push('\n');
            out.push_str(&u.bio);
            out.push('\n');
        }
        Ok(out)
    }

    /// Format a ratings list.
    pub fn format_ratings(&self, ratings: &[RatingRecord]) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(
                &ratings
                    .iter()
                    .map(|r| {
                        serde_json::json!({
                            "id": r.id,
                            "user": r.user,
                            "resource": r.resource,
                            "resource_title": r.resource_title,
                            "rating": r.rating,
                            "comment": r.comment,
                        })
                    })
                    .collect::<Vec<_>>(),
            )?),
            OutputFormat::Quiet => Ok(ratings
                .iter()
                .map(|r| r.id.to_string())
                .collect::<Vec<_>>()
                .join("\n")),
            OutputFormat::Table => {
                if ratings.is_empty() {
                    return Ok(self.colorize("No ratings.", "yellow"));
                }

                let mut builder = Builder::default();
                builder.push_record(["ID", "Resource", "By", "Stars", "Comment"]);
                for r in ratings {
                    builder.push_record([
                        r.id.to_string(),
                        r.resource_title.clone(),
                        r.user.clone(),
                        stars(r.rating as f64),
                        r.comment.clone(),
                    ]);
                }
                Ok(self.build_table(builder))
            }
        }
    }

    /// Format a download-history list.
    pub fn format_downloads(&self, downloads: &[DownloadRecord]) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(
                &downloads
                    .iter()
                    .map(|d| {
                        serde_json::json!({
                            "id": d.id,
                            "resource": d.resource,
                            "resource_title": d.resource_title,
                            "author": d.author,
                            "subject": d.subject,
                            "downloaded_at": d.downloaded_at,
                        })
                    })
                    .collect::<Vec<_>>(),
            )?),
            OutputFormat::Quiet => Ok(downloads
                .iter()
                .map(|d| d.id.to_string())
                .collect::<Vec<_>>()
                .join("\n")),
            OutputFormat::Table => {
                if downloads.is_empty() {
                    return Ok(self.colorize("No downloads.", "yellow"));
                }

                let mut builder = Builder::default();
                builder.push_record(["ID", "Resource", "Author", "Subject", "Type", "When"]);
                for d in downloads {
                    builder.push_record([
                        d.id.to_string(),
                        d.resource_title.clone(),
                        d.author.clone(),
                        d.subject.clone(),
                        d.resource_type.clone(),
                        d.downloaded_at.clone().unwrap_or_default(),
                    ]);
                }
                Ok(self.build_table(builder))
            }
        }
    }

    fn build_table(&self, builder: Builder) -> String {
        let mut table = builder.build();
        table
            .with(Style::rounded())
            .with(Modify::new(Rows::first()).with(Alignment::center()));
        table.to_string()
    }

    /// Format a success message.
    pub fn success(&self, message: &str) -> String {
        self.colorize(&format!("✓ {}", message), "green")
    }

    /// Format an error message.
    pub fn error(&self, message: &str) -> String {
        self.colorize(&format!("✗ {}", message), "red")
    }

    /// Format an info message.
    pub fn info(&self, message: &str) -> String {
        self.colorize(&format!("ℹ {}", message), "blue")
    }

    /// Format a warning message.
    pub fn warning(&self, message: &str) -> String {
        self.colorize(&format!("⚠ {}", message), "yellow")
    }

    /// Colorize text if color is enabled.
    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.color_enabled {
            return text.to_string();
        }

        match color {
            "red" => text.red().to_string(),
            "green" => text.green().to_string(),
            "blue" => text.blue().to_string(),
            "yellow" => text.yellow().to_string(),
            "cyan" => text.cyan().to_string(),
            _ => text.to_string(),
        }
    }
}

/// Render an average rating as a five-star strip.
fn stars(rating: f64) -> String {
    let filled = rating.round().clamp(0.0, 5.0) as usize;
    format!("{}{}", "★".repeat(filled), "☆".repeat(5 - filled))
}

#[cfg(test)]
mod tests {
    use super::*;
    use edushare_domain::{FriendshipId, RelationshipState};

    fn profile(id: i64, username: &str) -> UserProfile {
        serde_json::from_value(serde_json::json!({
            "id": id,
            "username": username,
            "institution": "Springfield High",
            "total_uploads": 4,
            "average_rating": 3.6,
        }))
        .unwrap()
    }

    #[test]
    fn test_stars() {
        assert_eq!(stars(0.0), "☆☆☆☆☆");
        assert_eq!(stars(3.6), "★★★★☆");
        assert_eq!(stars(5.0), "★★★★★");
        assert_eq!(stars(9.9), "★★★★★");
    }

    #[test]
    fn test_educators_table_format() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        let rows = vec![(
            profile(2, "bob"),
            RelationshipState::PendingSent(FriendshipId::new(10)),
        )];
        let output = formatter.format_educators(&rows).unwrap();
        assert!(output.contains("bob"));
        assert!(output.contains("pending-sent"));
    }

    #[test]
    fn test_educators_json_format() {
        let formatter = Formatter::new(OutputFormat::Json, false);
        let rows = vec![(profile(2, "bob"), RelationshipState::None)];
        let output = formatter.format_educators(&rows).unwrap();
        assert!(output.contains("\"relationship\": \"none\""));
        assert!(output.contains("\"friendship_id\": null"));
    }

    #[test]
    fn test_quiet_format_is_ids_only() {
        let formatter = Formatter::new(OutputFormat::Quiet, false);
        let rows = vec![
            (profile(2, "bob"), RelationshipState::None),
            (profile(5, "carol"), RelationshipState::Myself),
        ];
        let output = formatter.format_educators(&rows).unwrap();
        assert_eq!(output, "2\n5");
    }

    #[test]
    fn test_empty_resources_table() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        let output = formatter.format_resources(&[]).unwrap();
        assert!(output.contains("No resources"));
    }
}
