use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Kind of position advertised.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum JobPostType {
    #[default]
    FullTime,
    PartTime,
    SummerJob,
    Other,
}

impl JobPostType {
    pub const ALL: [JobPostType; 4] = [
        JobPostType::FullTime,
        JobPostType::PartTime,
        JobPostType::SummerJob,
        JobPostType::Other,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            JobPostType::FullTime => "Fulltid",
            JobPostType::PartTime => "Deltid",
            JobPostType::SummerJob => "Sommerjobb",
            JobPostType::Other => "Annet",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            JobPostType::FullTime => "FULL_TIME",
            JobPostType::PartTime => "PART_TIME",
            JobPostType::SummerJob => "SUMMER_JOB",
            JobPostType::Other => "OTHER",
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct JobPost {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub ingress: String,
    #[serde(default)]
    pub body: String,
    #[serde(default)]
    pub company: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub link: String,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub image_alt: Option<String>,
    #[serde(default)]
    pub deadline: Option<DateTime<Utc>>,
    /// No fixed deadline, applications are handled continuously.
    #[serde(default)]
    pub is_continuously_hiring: bool,
    #[serde(default)]
    pub job_type: JobPostType,
    #[serde(default = "default_class_start")]
    pub class_start: u8,
    #[serde(default = "default_class_end")]
    pub class_end: u8,
    #[serde(default)]
    pub expired: bool,
}

fn default_class_start() -> u8 {
    1
}

fn default_class_end() -> u8 {
    5
}

/// Create/update payload for `jobposts/`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct JobPostMutate {
    pub title: String,
    pub ingress: String,
    pub body: String,
    pub company: String,
    pub location: String,
    pub email: String,
    pub link: String,
    pub image: Option<String>,
    pub image_alt: Option<String>,
    pub deadline: Option<DateTime<Utc>>,
    pub is_continuously_hiring: bool,
    pub job_type: JobPostType,
    pub class_start: u8,
    pub class_end: u8,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_job_type_wire_names() {
        let post: JobPost =
            serde_json::from_str(r#"{"id": 3, "title": "Utvikler", "job_type": "SUMMER_JOB"}"#).unwrap();
        assert_eq!(post.job_type, JobPostType::SummerJob);
        assert_eq!(post.class_start, 1);
        assert_eq!(post.class_end, 5);
        assert_eq!(serde_json::to_string(&JobPostType::PartTime).unwrap(), "\"PART_TIME\"");
        assert_eq!(JobPostType::PartTime.as_str(), "PART_TIME");
    }
}
