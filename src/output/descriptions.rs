use crate::scoring::Category;

/// Short names of the nine categories, index 0 = category 1.
const NAMES: [&str; 9] = [
    "The Reformer",
    "The Helper",
    "The Achiever",
    "The Individualist",
    "The Investigator",
    "The Loyalist",
    "The Enthusiast",
    "The Challenger",
    "The Peacemaker",
];

const BLURBS: [&str; 9] = [
    "Principled and self-controlled, with an inner compass that never switches off. \
     Wants the world improved and the details right, and notices every one that isn't.",
    "Warm, generous and attuned to what everyone around them needs, sometimes before \
     they need it. Gives freely and quietly hopes the care flows back.",
    "Ambitious, adaptable and image-aware. Turns everything into a goal and every goal \
     into a finished one, shining brightest with an audience.",
    "Sensitive and expressive, at home in deep feeling. Wants to be understood as \
     genuinely one of a kind, and usually is.",
    "Perceptive and private, happiest observing and understanding from a little \
     distance. Runs on curiosity, recharges alone.",
    "Committed and responsible, the one who spots the risk nobody else planned for. \
     Loyal to people and ideas once trust is earned.",
    "Spontaneous, versatile and permanently in motion. Collects plans, skills and \
     adventures, and dreads a closed door more than a wrong turn.",
    "Direct, decisive and protective. Meets the world with strength, challenges what \
     seems unjust, and keeps the soft side well guarded.",
    "Easygoing and steady, the quiet glue of any group. Smooths conflict, sees every \
     side, and would rather merge agendas than fight over them.",
];

pub fn category_name(category: Category) -> &'static str {
    NAMES[usize::from(category.get()) - 1]
}

pub fn category_blurb(category: Category) -> &'static str {
    BLURBS[usize::from(category.get()) - 1]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_category_has_a_name_and_blurb() {
        for category in Category::all() {
            assert!(!category_name(category).is_empty());
            assert!(!category_blurb(category).is_empty());
        }
    }

    #[test]
    fn test_boundary_names() {
        assert_eq!(category_name(Category::new(1).unwrap()), "The Reformer");
        assert_eq!(category_name(Category::new(9).unwrap()), "The Peacemaker");
    }
}
