//! Rule-based task drafts used when no external generator is available.
//!
//! A goal is matched against keyword families in a fixed order; the first
//! family with a keyword contained in the lower-cased goal wins, and a
//! generic four-step breakdown covers everything else.

use crate::models::{Priority, TaskDraft};

use super::timeframe::extract_timeframe_days;

/// How much of the timeframe a step takes.
#[derive(Clone, Copy, Debug)]
enum Share {
    /// Always a single day.
    Day,
    /// Fraction of the timeframe, floored, at least one day.
    Of(f64),
}

impl Share {
    fn days(self, total_days: u32) -> f64 {
        match self {
            Share::Day => 1.0,
            Share::Of(fraction) => (f64::from(total_days) * fraction).floor().max(1.0),
        }
    }
}

type Step = (&'static str, Share, Priority);

struct Template {
    name: &'static str,
    keywords: &'static [&'static str],
    steps: &'static [Step],
}

use Priority::{High, Low, Medium};
use Share::{Day, Of};

const TEMPLATES: &[Template] = &[
    Template {
        name: "relocation",
        keywords: &["move", "apartment", "house", "relocate"],
        steps: &[
            ("Research neighborhoods and find new place", Of(0.2), High),
            ("Visit properties and make decision", Of(0.15), High),
            ("Give notice to current landlord", Day, High),
            ("Pack belongings and organize", Of(0.25), Medium),
            ("Arrange moving truck/help", Day, Medium),
            ("Transfer utilities and change address", Day, High),
            ("Move belongings to new place", Day, High),
            ("Unpack and settle in", Of(0.2), Medium),
        ],
    },
    Template {
        name: "study",
        keywords: &["exam", "test", "study", "homework"],
        steps: &[
            ("Review syllabus and exam format", Day, High),
            ("Create study schedule", Day, High),
            ("Review key concepts and notes", Of(0.4), High),
            ("Practice problems and past papers", Of(0.3), Medium),
            ("Final review and memorization", Of(0.2), High),
            ("Rest and prepare for exam day", Day, Medium),
        ],
    },
    Template {
        name: "fitness",
        keywords: &["fit", "exercise", "gym", "workout", "weight"],
        steps: &[
            ("Assess current fitness level", Day, High),
            ("Create workout plan and schedule", Day, High),
            ("Set up home gym or gym membership", Day, Medium),
            ("Start regular exercise routine", Of(0.6), High),
            ("Track progress and adjust plan", Of(0.2), Medium),
            ("Maintain healthy diet", Of(0.1), Medium),
        ],
    },
    Template {
        name: "product",
        keywords: &["launch", "product", "business", "app", "startup"],
        steps: &[
            ("Define requirements and scope", Of(0.1), High),
            ("Design and prototype", Of(0.2), High),
            ("Development and implementation", Of(0.4), Medium),
            ("Testing and bug fixes", Of(0.2), Medium),
            ("Launch preparation and marketing", Of(0.1), High),
        ],
    },
    Template {
        name: "learning",
        keywords: &["learn", "course", "skill", "language"],
        steps: &[
            ("Research learning resources", Day, High),
            ("Set up learning environment", Day, Medium),
            ("Create study schedule", Day, High),
            ("Begin learning and practice", Of(0.6), High),
            ("Practice and apply skills", Of(0.2), Medium),
            ("Test knowledge and review", Of(0.1), High),
        ],
    },
    Template {
        name: "travel",
        keywords: &["travel", "trip", "vacation", "holiday"],
        steps: &[
            ("Research destination and plan itinerary", Of(0.2), High),
            ("Book flights and accommodation", Day, High),
            ("Apply for visas/passport if needed", Of(0.1), High),
            ("Plan activities and make reservations", Of(0.15), Medium),
            ("Pack and prepare for trip", Of(0.1), Medium),
            ("Travel and enjoy the trip", Of(0.4), High),
            ("Return and organize memories", Of(0.05), Low),
        ],
    },
];

const GENERIC: Template = Template {
    name: "generic",
    keywords: &[],
    steps: &[
        ("Plan and research", Of(0.2), High),
        ("Prepare resources", Of(0.2), High),
        ("Execute main work", Of(0.4), Medium),
        ("Review and finalize", Of(0.2), High),
    ],
};

fn select(goal: &str) -> &'static Template {
    let lower = goal.to_lowercase();
    TEMPLATES
        .iter()
        .find(|t| t.keywords.iter().any(|k| lower.contains(k)))
        .unwrap_or(&GENERIC)
}

/// Name of the keyword family a goal falls into.
pub fn template_name(goal: &str) -> &'static str {
    select(goal).name
}

/// Draft tasks for `goal` from the keyword templates.
///
/// Step lengths are fractions of the goal's timeframe, or of
/// `default_window_days` when the goal names none. Drafts carry no
/// dependencies.
pub fn heuristic_drafts(goal: &str, default_window_days: u32) -> Vec<TaskDraft> {
    let total_days = extract_timeframe_days(goal).unwrap_or(default_window_days.max(1));
    select(goal)
        .steps
        .iter()
        .map(|&(title, share, priority)| TaskDraft::new(title, share.days(total_days), priority))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn durations(drafts: &[TaskDraft]) -> Vec<f64> {
        drafts.iter().filter_map(|d| d.duration_days).collect()
    }

    #[test]
    fn test_keyword_families() {
        assert_eq!(template_name("Relocate to Denver"), "relocation");
        assert_eq!(template_name("Pass my chemistry EXAM"), "study");
        assert_eq!(template_name("Go to the gym more"), "fitness");
        assert_eq!(template_name("Launch a newsletter"), "product");
        assert_eq!(template_name("Learn to play guitar"), "learning");
        assert_eq!(template_name("Plan a trip to Japan"), "travel");
        assert_eq!(template_name("Write a novel"), "generic");
    }

    #[test]
    fn test_first_family_wins() {
        // "move" (relocation) is checked before "study"
        assert_eq!(template_name("Move out before the study abroad term"), "relocation");
    }

    #[test]
    fn test_fractions_of_timeframe() {
        let drafts = heuristic_drafts("Write a novel in 20 days", 7);
        assert_eq!(durations(&drafts), vec![4.0, 4.0, 8.0, 4.0]);
        assert_eq!(drafts[2].title, "Execute main work");
        assert_eq!(drafts[2].priority, Some(Priority::Medium));
        assert!(drafts.iter().all(|d| d.depends_on_titles.is_empty()));
    }

    #[test]
    fn test_default_window_and_floor() {
        // 7 day window: 0.2 * 7 = 1.4 -> 1, 0.4 * 7 = 2.8 -> 2
        let drafts = heuristic_drafts("Write a novel", 7);
        assert_eq!(durations(&drafts), vec![1.0, 1.0, 2.0, 1.0]);

        let travel = heuristic_drafts("vacation", 7);
        assert_eq!(travel.last().and_then(|d| d.duration_days), Some(1.0));
        assert_eq!(travel.last().and_then(|d| d.priority), Some(Priority::Low));
    }
}
