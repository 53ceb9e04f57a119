//! Offline travel advisor behind the chat widget.
//!
//! DESIGN
//! ======
//! Replies are picked locally: the message is matched against a small keyword
//! table to find a topic, then a template for that topic is drawn with an RNG
//! seeded by the caller. The same input and seed always produce the same
//! reply, so the widget can be tested without a browser clock.

#[cfg(test)]
#[path = "advisor_test.rs"]
mod advisor_test;

use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Season {
    Spring,
    Summer,
    Autumn,
    Winter,
}

impl Season {
    /// Northern-hemisphere season for a 1-based month. Out-of-range months
    /// count as winter.
    pub fn from_month(month: u32) -> Self {
        match month {
            3..=5 => Self::Spring,
            6..=8 => Self::Summer,
            9..=11 => Self::Autumn,
            _ => Self::Winter,
        }
    }

    fn tip(self) -> &'static str {
        match self {
            Self::Spring => "Spring brings mild weather and shoulder-season prices.",
            Self::Summer => "Summer is peak season, so book early.",
            Self::Autumn => "Autumn is quieter and great value for city breaks.",
            Self::Winter => "Winter suits ski resorts and warm southern escapes.",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TimeOfDay {
    Morning,
    Afternoon,
    Evening,
    Night,
}

impl TimeOfDay {
    pub fn from_hour(hour: u32) -> Self {
        match hour {
            5..=11 => Self::Morning,
            12..=16 => Self::Afternoon,
            17..=21 => Self::Evening,
            _ => Self::Night,
        }
    }

    fn greeting(self) -> &'static str {
        match self {
            Self::Morning => "Good morning!",
            Self::Afternoon => "Good afternoon!",
            Self::Evening => "Good evening!",
            Self::Night => "Hello, night owl!",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Topic {
    Beach,
    Mountain,
    City,
    Budget,
    Food,
    Greeting,
}

const KEYWORDS: &[(Topic, &[&str])] = &[
    (Topic::Beach, &["beach", "sea", "coast", "island", "surf"]),
    (Topic::Mountain, &["mountain", "hike", "hiking", "ski", "skiing", "alps", "trek", "trekking"]),
    (Topic::City, &["city", "museum", "nightlife", "shopping", "downtown"]),
    (Topic::Budget, &["budget", "cheap", "afford", "deal", "price", "cost"]),
    (Topic::Food, &["food", "restaurant", "eat", "dinner", "cuisine", "wine"]),
];

/// Everything a reply depends on.
#[derive(Clone, Copy, Debug)]
pub struct AdvisorInput<'a> {
    pub message: &'a str,
    pub season: Season,
    pub time_of_day: TimeOfDay,
    pub seed: u64,
}

/// First topic with a keyword among the words of `message`; greeting
/// otherwise. Plain `s`/`es` plurals count as the keyword.
pub fn detect_topic(message: &str) -> Topic {
    let lowered = message.to_lowercase();
    let words = lowered.split(|c: char| !c.is_alphanumeric()).filter(|w| !w.is_empty()).collect::<Vec<_>>();
    KEYWORDS
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|keyword| words.iter().any(|word| is_word_form(word, keyword))))
        .map_or(Topic::Greeting, |(topic, _)| *topic)
}

fn is_word_form(word: &str, keyword: &str) -> bool {
    word == keyword || [word.strip_suffix("es"), word.strip_suffix('s')].contains(&Some(keyword))
}

fn templates(topic: Topic) -> &'static [&'static str] {
    match topic {
        Topic::Beach => &[
            "Try the Algarve for golden cliffs and calm coves.",
            "Singapore's Sentosa island pairs beaches with easy city access.",
            "For quieter sand, look at the Greek islands outside August.",
        ],
        Topic::Mountain => &[
            "The Tyrol has hut-to-hut treks for every fitness level.",
            "Chalets near Innsbruck make a good base for hiking or skiing.",
            "Consider a guided trek if you are new to alpine trails.",
        ],
        Topic::City => &[
            "Lisbon packs viewpoints, trams and late dinners into a walkable centre.",
            "Berlin rewards museum lovers with the Museum Island pass.",
            "Singapore's hawker centres and gardens fill a long weekend.",
        ],
        Topic::Budget => &[
            "Travel midweek and compare boutique hotels against chain rates.",
            "Bundle a tour with your stay; packages often undercut separate bookings.",
            "Shoulder-season flights are usually the biggest saving.",
        ],
        Topic::Food => &[
            "Book a Douro Valley wine day for tastings with river views.",
            "Ask locals for the nearest tasca; the best food rarely advertises.",
            "Street food tours are a cheap way to sample a whole cuisine.",
        ],
        Topic::Greeting => &[
            "Tell me what kind of trip you have in mind: beach, mountains, city or food?",
            "I can suggest destinations, tours and ways to save. Where would you like to go?",
        ],
    }
}

/// Compose a reply for the chat widget.
pub fn advise(input: AdvisorInput<'_>) -> String {
    let topic = detect_topic(input.message);
    let mut rng = StdRng::seed_from_u64(input.seed);
    let options = templates(topic);
    let body = options.choose(&mut rng).copied().unwrap_or_default();
    match topic {
        Topic::Greeting => format!("{} {body}", input.time_of_day.greeting()),
        _ => format!("{body} {}", input.season.tip()),
    }
}
