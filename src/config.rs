use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;

use crate::core::AnalyticsOptions;
use crate::models::{MatchPolicy, ScoringWeights};

/// Application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub matching: MatchingSettings,
    #[serde(default)]
    pub scoring: ScoringSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    pub workers: Option<usize>,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            workers: None,
        }
    }
}

fn default_host() -> String { "0.0.0.0".to_string() }
fn default_port() -> u16 { 8080 }

/// Ranking and analytics defaults applied at the HTTP boundary
#[derive(Debug, Clone, Deserialize)]
pub struct MatchingSettings {
    #[serde(default = "default_student_min_score")]
    pub student_min_score: f64,
    #[serde(default = "default_job_min_score")]
    pub job_min_score: f64,
    #[serde(default = "default_limit")]
    pub default_limit: u16,
    #[serde(default = "default_max_limit")]
    pub max_limit: u16,
    #[serde(default = "default_qualified_threshold")]
    pub qualified_threshold: f64,
    #[serde(default = "default_analytics_thresholds")]
    pub analytics_thresholds: Vec<f64>,
    #[serde(default = "default_top_gaps")]
    pub top_gaps: usize,
}

impl Default for MatchingSettings {
    fn default() -> Self {
        Self {
            student_min_score: default_student_min_score(),
            job_min_score: default_job_min_score(),
            default_limit: default_limit(),
            max_limit: default_max_limit(),
            qualified_threshold: default_qualified_threshold(),
            analytics_thresholds: default_analytics_thresholds(),
            top_gaps: default_top_gaps(),
        }
    }
}

impl MatchingSettings {
    pub fn analytics_options(&self) -> AnalyticsOptions {
        AnalyticsOptions {
            thresholds: self.analytics_thresholds.clone(),
            qualified_threshold: self.qualified_threshold,
            top_gaps: self.top_gaps,
        }
    }

    /// Requested limit, or the default, capped at `max_limit`
    pub fn effective_limit(&self, requested: Option<u16>) -> usize {
        requested.unwrap_or(self.default_limit).min(self.max_limit) as usize
    }
}

fn default_student_min_score() -> f64 { 50.0 }
fn default_job_min_score() -> f64 { 60.0 }
fn default_limit() -> u16 { 10 }
fn default_max_limit() -> u16 { 100 }
fn default_qualified_threshold() -> f64 { 60.0 }
fn default_analytics_thresholds() -> Vec<f64> { vec![50.0, 60.0, 80.0] }
fn default_top_gaps() -> usize { 5 }

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ScoringSettings {
    #[serde(default)]
    pub weights: WeightsConfig,
    #[serde(default)]
    pub policy: PolicyConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WeightsConfig {
    #[serde(default = "default_subjects_weight")]
    pub subjects: f64,
    #[serde(default = "default_gpa_weight")]
    pub gpa: f64,
    #[serde(default = "default_course_weight")]
    pub course: f64,
    #[serde(default = "default_semester_weight")]
    pub semester: f64,
}

impl Default for WeightsConfig {
    fn default() -> Self {
        Self {
            subjects: default_subjects_weight(),
            gpa: default_gpa_weight(),
            course: default_course_weight(),
            semester: default_semester_weight(),
        }
    }
}

impl From<&WeightsConfig> for ScoringWeights {
    fn from(value: &WeightsConfig) -> Self {
        ScoringWeights {
            subjects: value.subjects,
            gpa: value.gpa,
            course: value.course,
            semester: value.semester,
        }
    }
}

fn default_subjects_weight() -> f64 { 0.55 }
fn default_gpa_weight() -> f64 { 0.20 }
fn default_course_weight() -> f64 { 0.15 }
fn default_semester_weight() -> f64 { 0.10 }

#[derive(Debug, Clone, Deserialize)]
pub struct PolicyConfig {
    #[serde(default = "default_subject_ratio_cap")]
    pub subject_ratio_cap: f64,
}

impl Default for PolicyConfig {
    fn default() -> Self {
        Self { subject_ratio_cap: default_subject_ratio_cap() }
    }
}

impl From<&PolicyConfig> for MatchPolicy {
    fn from(value: &PolicyConfig) -> Self {
        MatchPolicy { subject_ratio_cap: value.subject_ratio_cap }
    }
}

fn default_subject_ratio_cap() -> f64 { 1.0 }

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_log_level() -> String { "info".to_string() }
fn default_log_format() -> String { "json".to_string() }

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration file (config/default.toml)
    /// 3. Local overrides (config/local.toml)
    /// 4. Environment variables (prefixed with GRADEMATCH__)
    pub fn load() -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            // e.g., GRADEMATCH__SERVER__PORT -> server.port
            .add_source(environment())
            .build()?
            .try_deserialize()
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(environment())
            .build()?
            .try_deserialize()
    }

    pub fn scoring_weights(&self) -> ScoringWeights {
        ScoringWeights::from(&self.scoring.weights)
    }

    pub fn match_policy(&self) -> MatchPolicy {
        MatchPolicy::from(&self.scoring.policy)
    }
}

fn environment() -> Environment {
    Environment::with_prefix("GRADEMATCH")
        .prefix_separator("__")
        .separator("__")
        .try_parsing(true)
}
