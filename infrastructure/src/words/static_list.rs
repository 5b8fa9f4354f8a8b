//! Built-in category word list
//!
//! A draw picks a category uniformly, then a word uniformly within it.

use impostor_application::ports::word_provider::WordProvider;
use impostor_domain::SecretWord;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use std::sync::Mutex;

/// A named group of candidate secret words
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    pub name: String,
    pub words: Vec<String>,
}

impl Category {
    pub fn new(name: impl Into<String>, words: &[&str]) -> Self {
        Self {
            name: name.into(),
            words: words.iter().map(|w| w.to_string()).collect(),
        }
    }
}

pub const DEFAULT_CATEGORIES: &[(&str, &[&str])] = &[
    (
        "animals",
        &[
            "dog", "cat", "elephant", "lion", "tiger", "giraffe", "penguin", "dolphin",
            "eagle", "butterfly", "snake", "frog", "horse", "rabbit", "bear", "wolf",
            "fox", "owl", "shark", "whale", "kangaroo", "monkey", "zebra", "camel",
            "octopus", "turtle", "parrot", "squirrel", "bee", "spider",
        ],
    ),
    (
        "food",
        &[
            "pizza", "burger", "sushi", "pasta", "salad", "soup", "taco", "sandwich",
            "pancake", "chocolate", "cheese", "bread", "apple", "banana", "strawberry",
            "rice", "egg", "steak", "popcorn", "cookie", "cake", "honey", "lemon",
            "carrot", "potato", "tomato", "mushroom", "yogurt", "coffee", "tea",
        ],
    ),
    (
        "objects",
        &[
            "chair", "table", "lamp", "mirror", "clock", "umbrella", "key", "scissors",
            "pencil", "book", "phone", "camera", "bottle", "glasses", "wallet",
            "backpack", "candle", "pillow", "blanket", "ladder", "hammer", "bucket",
            "guitar", "piano", "bicycle", "balloon", "kite", "envelope", "toothbrush",
            "television",
        ],
    ),
    (
        "places",
        &[
            "beach", "mountain", "hospital", "school", "library", "museum", "airport",
            "restaurant", "park", "cinema", "stadium", "castle", "desert", "forest",
            "island", "volcano", "farm", "zoo", "church", "prison", "bakery", "market",
            "gym", "theater", "bridge", "cave", "lighthouse", "harbor", "supermarket",
            "circus",
        ],
    ),
    (
        "professions",
        &[
            "doctor", "teacher", "firefighter", "chef", "pilot", "farmer", "lawyer",
            "nurse", "dentist", "astronaut", "mechanic", "painter", "musician",
            "scientist", "police", "baker", "carpenter", "plumber", "journalist",
            "photographer", "architect", "engineer", "actor", "dancer", "librarian",
            "gardener", "fisherman", "judge", "waiter", "veterinarian",
        ],
    ),
    (
        "sports",
        &[
            "football", "basketball", "tennis", "swimming", "boxing", "golf",
            "baseball", "volleyball", "cycling", "skiing", "surfing", "running",
            "climbing", "hockey", "rugby", "karate", "fencing", "rowing", "archery",
            "chess", "skating", "gymnastics", "wrestling", "badminton", "diving",
            "sailing", "bowling", "cricket", "marathon", "snowboard",
        ],
    ),
    (
        "nature",
        &[
            "sun", "moon", "star", "rain", "snow", "wind", "cloud", "rainbow", "river",
            "ocean", "lake", "tree", "flower", "grass", "rock", "sand", "fire",
            "thunder", "lightning", "fog", "storm", "waterfall", "glacier", "meadow",
            "jungle", "leaf", "root", "seed", "coral", "sunset",
        ],
    ),
    (
        "emotions",
        &[
            "happiness", "sadness", "anger", "fear", "surprise", "love", "jealousy",
            "pride", "shame", "guilt", "hope", "nostalgia", "boredom", "curiosity",
            "anxiety", "relief", "gratitude", "loneliness", "excitement", "calm",
            "confusion", "disgust", "envy", "joy", "panic", "trust", "doubt",
            "courage", "embarrassment", "admiration",
        ],
    ),
];

/// Word provider over a fixed set of categories
pub struct StaticWordList {
    categories: Vec<Category>,
    rng: Mutex<StdRng>,
}

impl StaticWordList {
    /// The built-in English list
    pub fn new() -> Self {
        Self::from_categories(default_categories(), StdRng::from_os_rng())
    }

    /// The built-in list with a reproducible draw sequence
    pub fn with_seed(seed: u64) -> Self {
        Self::from_categories(default_categories(), StdRng::seed_from_u64(seed))
    }

    /// Custom categories. Empty categories are dropped.
    pub fn from_categories(categories: Vec<Category>, rng: StdRng) -> Self {
        Self {
            categories: categories
                .into_iter()
                .filter(|c| !c.words.is_empty())
                .collect(),
            rng: Mutex::new(rng),
        }
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn word_count(&self) -> usize {
        self.categories.iter().map(|c| c.words.len()).sum()
    }
}

impl Default for StaticWordList {
    fn default() -> Self {
        Self::new()
    }
}

fn default_categories() -> Vec<Category> {
    DEFAULT_CATEGORIES
        .iter()
        .map(|(name, words)| Category::new(*name, words))
        .collect()
}

impl WordProvider for StaticWordList {
    fn next_secret_word(&self) -> Option<SecretWord> {
        let mut rng = self.rng.lock().ok()?;
        let category = self.categories.choose(&mut *rng)?;
        let word = category.words.choose(&mut *rng)?;
        Some(SecretWord {
            word: word.clone(),
            category: category.name.clone(),
        })
    }
}
