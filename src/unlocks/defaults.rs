//! Default catalog definitions.

use super::types::{GearSlot, Requirements, UnlockableItem};

/// Default background id. Always unlocked; the background slot is never empty.
pub const DEFAULT_BACKGROUND: &str = "default-gym";

/// Starter badge id. Always unlocked.
pub const STARTER_BADGE: &str = "newcomer";

/// Get all default catalog items.
pub fn default_items() -> Vec<UnlockableItem> {
    let mut items = Vec::new();

    items.extend(gear_items());
    items.extend(background_items());
    items.extend(badge_items());

    items
}

fn gear_items() -> Vec<UnlockableItem> {
    vec![
        // Helmets
        UnlockableItem::gear("basic-cap", "Basic Cap", GearSlot::Helmet, Requirements::none())
            .with_description("A simple cap to get you started")
            .starter(),
        UnlockableItem::gear(
            "pro-headband",
            "Pro Headband",
            GearSlot::Helmet,
            Requirements::points(500),
        )
        .with_description("Keep the sweat out of your eyes"),
        UnlockableItem::gear(
            "champion-crown",
            "Champion Crown",
            GearSlot::Helmet,
            Requirements::points(5000).with_achievement("step-champion"),
        )
        .with_description("For those who walk among champions"),
        // Shirts
        UnlockableItem::gear(
            "basic-tshirt",
            "Basic T-Shirt",
            GearSlot::Shirt,
            Requirements::none(),
        )
        .starter(),
        UnlockableItem::gear("tank-top", "Tank Top", GearSlot::Shirt, Requirements::points(250)),
        UnlockableItem::gear(
            "compression-shirt",
            "Compression Shirt",
            GearSlot::Shirt,
            Requirements::points(1000),
        ),
        UnlockableItem::gear(
            "champion-jersey",
            "Champion Jersey",
            GearSlot::Shirt,
            Requirements::points(3000).with_achievement("team-player"),
        )
        .with_description("Earned, never given"),
        // Pants
        UnlockableItem::gear(
            "basic-shorts",
            "Basic Shorts",
            GearSlot::Pants,
            Requirements::none(),
        )
        .starter(),
        UnlockableItem::gear(
            "athletic-leggings",
            "Athletic Leggings",
            GearSlot::Pants,
            Requirements::points(400),
        ),
        UnlockableItem::gear(
            "pro-joggers",
            "Pro Joggers",
            GearSlot::Pants,
            Requirements::points(1500),
        ),
        // Shoes
        UnlockableItem::gear(
            "basic-sneakers",
            "Basic Sneakers",
            GearSlot::Shoes,
            Requirements::none(),
        )
        .starter(),
        UnlockableItem::gear(
            "running-shoes",
            "Running Shoes",
            GearSlot::Shoes,
            Requirements::points(750).with_achievement("first-steps"),
        )
        .with_description("Put your steps to work"),
        UnlockableItem::gear(
            "cross-trainers",
            "Cross Trainers",
            GearSlot::Shoes,
            Requirements::points(2000),
        ),
        // Accessories
        UnlockableItem::gear(
            "fitness-watch",
            "Fitness Watch",
            GearSlot::Accessory,
            Requirements::points(1200),
        ),
        UnlockableItem::gear(
            "wireless-earbuds",
            "Wireless Earbuds",
            GearSlot::Accessory,
            Requirements::points(800),
        ),
    ]
}

fn background_items() -> Vec<UnlockableItem> {
    vec![
        UnlockableItem::background(DEFAULT_BACKGROUND, "Default Gym", Requirements::none())
            .with_description("Where every journey begins")
            .starter(),
        UnlockableItem::background("outdoor-park", "Outdoor Park", Requirements::points(300)),
        UnlockableItem::background("modern-studio", "Modern Studio", Requirements::points(900)),
        UnlockableItem::background(
            "beach-workout",
            "Beach Workout",
            Requirements::points(1800).with_achievement("hydration-master"),
        ),
        UnlockableItem::background("mountain-peak", "Mountain Peak", Requirements::points(3500)),
        UnlockableItem::background(
            "elite-facility",
            "Elite Facility",
            Requirements::points(7500).with_achievement("elite-athlete"),
        )
        .with_description("Reserved for the truly dedicated"),
    ]
}

fn badge_items() -> Vec<UnlockableItem> {
    vec![
        UnlockableItem::badge(STARTER_BADGE, "Newcomer", Requirements::none())
            .with_description("Welcome to the team")
            .starter(),
        UnlockableItem::badge(
            "first-steps",
            "First Steps",
            Requirements::none().with_achievement("first-steps"),
        ),
        UnlockableItem::badge("dedicated", "Dedicated", Requirements::points(1000)),
        UnlockableItem::badge("achiever", "Achiever", Requirements::points(2500)),
        UnlockableItem::badge(
            "team-player",
            "Team Player",
            Requirements::none().with_achievement("team-player"),
        ),
        UnlockableItem::badge(
            "hydration-master",
            "Hydration Master",
            Requirements::none().with_achievement("hydration-master"),
        ),
        UnlockableItem::badge(
            "step-champion",
            "Step Champion",
            Requirements::points(2000).with_achievement("step-champion"),
        ),
        UnlockableItem::badge(
            "elite-athlete",
            "Elite Athlete",
            Requirements::points(10000),
        ),
    ]
}
