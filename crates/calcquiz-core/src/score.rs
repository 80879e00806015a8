//! Final scoring: percentage, grade band, improvement tips and the
//! persistence payload.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::model::{Difficulty, Topic};

/// Percentages below this get improvement tips.
pub const TIPS_THRESHOLD: u32 = 70;

/// Maximum number of tips shown.
pub const MAX_TIPS: usize = 3;

const BASE_TIPS: [&str; 3] = [
    "Review the theory for this topic",
    "Practice more questions of the same kind",
    "Go over the mistakes you made in this quiz",
];

/// `round(correct / total * 100)`, rounding halves up. Zero when `total` is zero.
pub fn percentage(correct: usize, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    // integer form of floor(x + 0.5)
    ((correct * 200 + total) / (total * 2)) as u32
}

// ---------------------------------------------------------------------------
// Grade
// ---------------------------------------------------------------------------

/// Grade band for a final percentage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Grade {
    Outstanding,
    Excellent,
    VeryGood,
    Good,
    Passing,
    NeedsImprovement,
}

impl Grade {
    /// First band whose lower bound `percentage` reaches.
    pub fn from_percentage(percentage: u32) -> Grade {
        match percentage {
            95.. => Grade::Outstanding,
            90..=94 => Grade::Excellent,
            80..=89 => Grade::VeryGood,
            70..=79 => Grade::Good,
            60..=69 => Grade::Passing,
            _ => Grade::NeedsImprovement,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Grade::Outstanding => "Outstanding!",
            Grade::Excellent => "Excellent!",
            Grade::VeryGood => "Very good!",
            Grade::Good => "Good!",
            Grade::Passing => "Passing",
            Grade::NeedsImprovement => "Needs improvement",
        }
    }

    pub fn emoji(&self) -> &'static str {
        match self {
            Grade::Outstanding => "🏆",
            Grade::Excellent => "⭐",
            Grade::VeryGood => "👍",
            Grade::Good => "👌",
            Grade::Passing => "📚",
            Grade::NeedsImprovement => "💪",
        }
    }

    /// Hex color used when the grade is displayed.
    pub fn color(&self) -> &'static str {
        match self {
            Grade::Outstanding => "#FFD700",
            Grade::Excellent => "#10b981",
            Grade::VeryGood => "#3b82f6",
            Grade::Good => "#f59e0b",
            Grade::Passing => "#ef4444",
            Grade::NeedsImprovement => "#dc2626",
        }
    }
}

impl std::fmt::Display for Grade {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.label(), self.emoji())
    }
}

// ---------------------------------------------------------------------------
// Tips and time
// ---------------------------------------------------------------------------

fn topic_tips(topic: Topic) -> &'static [&'static str] {
    match topic {
        Topic::Derivatives => &[
            "Learn the basic derivative rules by heart",
            "Practice the chain rule on simple examples",
            "Check your result against the derivative of a simpler function",
        ],
        Topic::Integrals => &[
            "Always add +C to indefinite integrals",
            "Practice the power rule for integrals",
            "Learn the basic integrals by heart",
        ],
        Topic::Limits => &[
            "Practice recognizing indeterminate forms",
            "Learn the standard trigonometric limits",
            "Practice limits at infinity",
        ],
        Topic::CriticalPoints => &[
            "Compute derivatives carefully",
            "Practice solving quadratic and cubic equations",
            "Check every solution by substituting it back",
        ],
        Topic::General | Topic::Personalized | Topic::Unknown => &[],
    }
}

/// Improvement tips for a final percentage. Empty at or above
/// [`TIPS_THRESHOLD`].
pub fn improvement_tips(topic: Topic, percentage: u32) -> Vec<&'static str> {
    if percentage >= TIPS_THRESHOLD {
        return Vec::new();
    }
    BASE_TIPS
        .iter()
        .chain(topic_tips(topic))
        .copied()
        .take(MAX_TIPS)
        .collect()
}

/// `M:SS min` from one minute up, `N seconds` below that.
pub fn format_elapsed(secs: u64) -> String {
    let minutes = secs / 60;
    if minutes > 0 {
        format!("{minutes}:{:02} min", secs % 60)
    } else {
        format!("{secs} seconds")
    }
}

/// Whole seconds between two instants, rounded to nearest. Never negative.
pub fn elapsed_secs(started_at: DateTime<Utc>, finished_at: DateTime<Utc>) -> u64 {
    let millis = (finished_at - started_at).num_milliseconds().max(0) as u64;
    (millis + 500) / 1000
}

// ---------------------------------------------------------------------------
// Report
// ---------------------------------------------------------------------------

/// Summary of a completed session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreReport {
    pub topic: Topic,
    pub difficulty: Difficulty,
    pub correct: usize,
    pub total: usize,
    pub percentage: u32,
    pub grade: Grade,
    pub tips: Vec<String>,
    /// Seconds from session start to completion, when a start was recorded.
    pub elapsed_secs: Option<u64>,
    pub completed_at: DateTime<Utc>,
}

impl ScoreReport {
    pub fn new(
        topic: Topic,
        difficulty: Difficulty,
        correct: usize,
        total: usize,
        started_at: Option<DateTime<Utc>>,
        completed_at: DateTime<Utc>,
    ) -> Self {
        let percentage = percentage(correct, total);
        Self {
            topic,
            difficulty,
            correct,
            total,
            percentage,
            grade: Grade::from_percentage(percentage),
            tips: improvement_tips(topic, percentage)
                .into_iter()
                .map(String::from)
                .collect(),
            elapsed_secs: started_at.map(|start| elapsed_secs(start, completed_at)),
            completed_at,
        }
    }

    pub fn wrong(&self) -> usize {
        self.total - self.correct
    }

    /// Payload for the result sink.
    pub fn to_save_request(&self) -> SaveResultRequest {
        SaveResultRequest {
            topic: self.topic.to_string(),
            score: self.correct,
            total_questions: self.total,
            time_spent: self.elapsed_secs,
            details: SaveResultDetails {
                percentage: self.percentage,
                difficulty: self.difficulty.to_string(),
                date: self.completed_at.to_rfc3339(),
            },
        }
    }
}

/// Body of `POST /api/save-result`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaveResultRequest {
    pub topic: String,
    pub score: usize,
    pub total_questions: usize,
    pub time_spent: Option<u64>,
    pub details: SaveResultDetails,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaveResultDetails {
    pub percentage: u32,
    pub difficulty: String,
    /// RFC 3339 completion time.
    pub date: String,
}

/// What the result sink answered.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SaveReceipt {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub result_id: Option<serde_json::Value>,
    #[serde(default)]
    pub message: Option<String>,
}
