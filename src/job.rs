use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use chrono_tz::America::New_York;
use serde::{Deserialize, Serialize};

/// Coarse keyword-based role classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum JobFamily {
    #[serde(rename = "Mechanical Engineer")]
    MechanicalEngineer,
    #[serde(rename = "System(s) Engineer")]
    SystemsEngineer,
    #[serde(rename = "Project Manager")]
    ProjectManager,
    #[default]
    Other,
}

impl JobFamily {
    pub fn label(self) -> &'static str {
        match self {
            JobFamily::MechanicalEngineer => "Mechanical Engineer",
            JobFamily::SystemsEngineer => "System(s) Engineer",
            JobFamily::ProjectManager => "Project Manager",
            JobFamily::Other => "Other",
        }
    }
}

impl fmt::Display for JobFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for JobFamily {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Mechanical Engineer" => Ok(JobFamily::MechanicalEngineer),
            "System(s) Engineer" => Ok(JobFamily::SystemsEngineer),
            "Project Manager" => Ok(JobFamily::ProjectManager),
            "Other" => Ok(JobFamily::Other),
            other => Err(format!("Unknown job family '{}'", other)),
        }
    }
}

/// Source-site category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum WebsiteType {
    Linkedin,
    Indeed,
    Company,
    #[default]
    Other,
}

impl WebsiteType {
    pub fn as_str(self) -> &'static str {
        match self {
            WebsiteType::Linkedin => "linkedin",
            WebsiteType::Indeed => "indeed",
            WebsiteType::Company => "company",
            WebsiteType::Other => "other",
        }
    }
}

impl fmt::Display for WebsiteType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WebsiteType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "linkedin" => Ok(WebsiteType::Linkedin),
            "indeed" => Ok(WebsiteType::Indeed),
            "company" => Ok(WebsiteType::Company),
            "other" => Ok(WebsiteType::Other),
            other => Err(format!("Unknown website type '{}'", other)),
        }
    }
}

/// A job posting captured from a page.
///
/// `url` is the natural key: a second record with the same URL is a duplicate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct JobRecord {
    pub company_name: Option<String>,
    pub job_role: Option<String>,
    pub job_family: JobFamily,
    pub job_description: Option<String>,
    pub recruiter_name: Option<String>,
    pub website_type: WebsiteType,
    pub full_website: String,
    /// US/Eastern wall clock rendered with a trailing "Z"
    pub extracted_at: String,
    /// Days since posting; `None` when no date phrase was found
    pub job_freshness: Option<u32>,
    pub url: String,
    pub company_section: Option<String>,
    pub position_summary: Option<String>,
    #[serde(default)]
    pub comments: String,
}

/// Render `now` as US/Eastern wall-clock time with a "Z" suffix.
///
/// The value is *not* UTC despite the suffix; stored records have always used
/// this format, so it is kept for compatibility with existing exports.
pub fn eastern_timestamp(now: DateTime<Utc>) -> String {
    now.with_timezone(&New_York)
        .naive_local()
        .format("%Y-%m-%dT%H:%M:%SZ")
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_eastern_timestamp_winter() {
        let now = Utc.with_ymd_and_hms(2024, 1, 15, 17, 30, 45).unwrap();
        assert_eq!(eastern_timestamp(now), "2024-01-15T12:30:45Z");
    }

    #[test]
    fn test_eastern_timestamp_summer() {
        let now = Utc.with_ymd_and_hms(2024, 7, 4, 3, 5, 9).unwrap();
        assert_eq!(eastern_timestamp(now), "2024-07-03T23:05:09Z");
    }

    #[test]
    fn test_eastern_timestamp_drops_fraction() {
        let now = Utc.with_ymd_and_hms(2024, 1, 15, 17, 30, 45).unwrap()
            + chrono::Duration::milliseconds(987);
        assert_eq!(eastern_timestamp(now), "2024-01-15T12:30:45Z");
    }

    #[test]
    fn test_record_serializes_with_camel_case_fields() {
        let record = JobRecord {
            company_name: Some("Acme".into()),
            job_family: JobFamily::SystemsEngineer,
            website_type: WebsiteType::Linkedin,
            url: "https://www.linkedin.com/jobs/view/1".into(),
            ..Default::default()
        };

        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["companyName"], "Acme");
        assert_eq!(json["jobFamily"], "System(s) Engineer");
        assert_eq!(json["websiteType"], "linkedin");
        assert!(json["jobFreshness"].is_null());
        assert_eq!(json["comments"], "");
    }

    #[test]
    fn test_enum_labels_parse_back() {
        for family in [
            JobFamily::MechanicalEngineer,
            JobFamily::SystemsEngineer,
            JobFamily::ProjectManager,
            JobFamily::Other,
        ] {
            assert_eq!(family.label().parse::<JobFamily>(), Ok(family));
        }
        assert_eq!("indeed".parse::<WebsiteType>(), Ok(WebsiteType::Indeed));
        assert!("myspace".parse::<WebsiteType>().is_err());
    }
}
