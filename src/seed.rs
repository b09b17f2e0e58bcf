//! Demo fixtures for a fresh database.
//!
//! Every write is keyed on a natural key (names, emails, titles, content
//! keys) so running the seed twice leaves the same rows behind.

use crate::auth;
use crate::error::{AppError, AppResult};
use crate::models::{ListingStatus, NewProperty, PropertyChanges, PropertyType, UserRole};
use crate::AppState;
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::HashMap;
use tracing::info;
use uuid::Uuid;

pub const DEFAULT_ADMIN_EMAIL: &str = "admin@estate.local";
pub const DEFAULT_ADMIN_PASSWORD: &str = "admin12345";
const AGENT_EMAIL: &str = "agent@estate.local";
const AGENT_PASSWORD: &str = "agent12345";

/// Back-office account created by the seed
#[derive(Debug, Clone)]
pub struct AdminCredentials {
    pub email: String,
    pub password: String,
}

impl AdminCredentials {
    /// `SEED_ADMIN_EMAIL` / `SEED_ADMIN_PASSWORD`, falling back to demo values
    pub fn from_env() -> Self {
        Self {
            email: std::env::var("SEED_ADMIN_EMAIL")
                .unwrap_or_else(|_| DEFAULT_ADMIN_EMAIL.to_string()),
            password: std::env::var("SEED_ADMIN_PASSWORD")
                .unwrap_or_else(|_| DEFAULT_ADMIN_PASSWORD.to_string()),
        }
    }
}

/// Row counts touched by one seed run
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct SeedSummary {
    pub categories: usize,
    pub amenities: usize,
    pub features: usize,
    pub users: usize,
    pub properties_created: usize,
    pub properties_updated: usize,
    pub images_added: usize,
    pub content_blocks: usize,
}

const CATEGORIES: &[(&str, &str)] = &[
    ("Condos", "Low-maintenance living in managed buildings"),
    ("Single-Family Homes", "Detached homes with private yards"),
    ("Townhouses", "Multi-level homes sharing a wall with neighbors"),
    ("Neighborhoods", "Master-planned communities and new developments"),
    ("Land", "Lots ready for a custom build"),
];

const AMENITIES: &[(&str, &str)] = &[
    ("Swimming Pool", "pool"),
    ("Fitness Center", "dumbbell"),
    ("Covered Parking", "car"),
    ("Concierge", "bell"),
    ("Rooftop Deck", "sun"),
    ("Pet Friendly", "paw"),
    ("Playground", "tree"),
];

const FEATURES: &[(&str, &str)] = &[
    ("Hardwood Floors", "Solid oak throughout the main living areas"),
    ("Smart Home", "App-controlled lighting, locks and thermostat"),
    ("Open Floor Plan", "Kitchen, dining and living in one space"),
    ("Fireplace", "Wood-burning or gas fireplace"),
    ("Walk-in Closet", "Primary suite walk-in closet"),
    ("Solar Panels", "Rooftop solar array"),
    ("Chef's Kitchen", "Quartz counters and stainless appliances"),
];

struct PropertyFixture {
    title: &'static str,
    description: &'static str,
    property_type: PropertyType,
    status: ListingStatus,
    price: i64,
    address: &'static str,
    city: &'static str,
    state: &'static str,
    zip_code: &'static str,
    bedrooms: i32,
    bathrooms: i32,
    size_sqft: i32,
    year_built: Option<i32>,
    category: &'static str,
    featured: bool,
    amenities: &'static [&'static str],
    features: &'static [&'static str],
    gallery: &'static [&'static str],
}

const PROPERTIES: &[PropertyFixture] = &[
    PropertyFixture {
        title: "Skyline Loft Condo",
        description: "Corner unit with floor-to-ceiling windows over downtown.",
        property_type: PropertyType::Condo,
        status: ListingStatus::ForSale,
        price: 685_000,
        address: "100 Congress Ave #1804",
        city: "Austin",
        state: "TX",
        zip_code: "78701",
        bedrooms: 2,
        bathrooms: 2,
        size_sqft: 1_240,
        year_built: Some(2017),
        category: "Condos",
        featured: true,
        amenities: &["Swimming Pool", "Fitness Center", "Concierge", "Rooftop Deck"],
        features: &["Smart Home", "Open Floor Plan"],
        gallery: &[
            "https://images.unsplash.com/photo-1502672260266-1c1ef2d93688?w=1200",
            "https://images.unsplash.com/photo-1493809842364-78817add7ffb?w=1200",
        ],
    },
    PropertyFixture {
        title: "Lakeside Studio Condo",
        description: "Bright studio steps from the hike-and-bike trail.",
        property_type: PropertyType::Condo,
        status: ListingStatus::ForRent,
        price: 1_950,
        address: "55 Riverside Dr #310",
        city: "Austin",
        state: "TX",
        zip_code: "78704",
        bedrooms: 0,
        bathrooms: 1,
        size_sqft: 540,
        year_built: Some(2009),
        category: "Condos",
        featured: false,
        amenities: &["Fitness Center", "Covered Parking", "Pet Friendly"],
        features: &["Open Floor Plan"],
        gallery: &["https://images.unsplash.com/photo-1522708323590-d24dbb6b0267?w=1200"],
    },
    PropertyFixture {
        title: "Craftsman Bungalow on Elm",
        description: "Restored 1920s craftsman with a deep front porch and detached studio.",
        property_type: PropertyType::SingleFamily,
        status: ListingStatus::ForSale,
        price: 815_000,
        address: "2210 Elm St",
        city: "Denver",
        state: "CO",
        zip_code: "80205",
        bedrooms: 3,
        bathrooms: 2,
        size_sqft: 1_860,
        year_built: Some(1924),
        category: "Single-Family Homes",
        featured: true,
        amenities: &["Pet Friendly"],
        features: &["Hardwood Floors", "Fireplace", "Walk-in Closet"],
        gallery: &[
            "https://images.unsplash.com/photo-1568605114967-8130f3a36994?w=1200",
            "https://images.unsplash.com/photo-1570129477492-45c003edd2be?w=1200",
            "https://images.unsplash.com/photo-1484154218962-a197022b5858?w=1200",
        ],
    },
    PropertyFixture {
        title: "Modern Farmhouse Retreat",
        description: "New construction on half an acre with a chef's kitchen and solar.",
        property_type: PropertyType::SingleFamily,
        status: ListingStatus::ForSale,
        price: 1_240_000,
        address: "48 Meadowlark Ln",
        city: "Boulder",
        state: "CO",
        zip_code: "80304",
        bedrooms: 5,
        bathrooms: 4,
        size_sqft: 3_950,
        year_built: Some(2022),
        category: "Single-Family Homes",
        featured: true,
        amenities: &["Covered Parking", "Swimming Pool"],
        features: &["Chef's Kitchen", "Solar Panels", "Smart Home", "Open Floor Plan"],
        gallery: &[
            "https://images.unsplash.com/photo-1600596542815-ffad4c1539a9?w=1200",
            "https://images.unsplash.com/photo-1600585154340-be6161a56a0c?w=1200",
        ],
    },
    PropertyFixture {
        title: "Ranch Home with Mountain Views",
        description: "Single-level living with an updated kitchen. Under contract.",
        property_type: PropertyType::SingleFamily,
        status: ListingStatus::Pending,
        price: 569_000,
        address: "913 Ridge Rd",
        city: "Golden",
        state: "CO",
        zip_code: "80401",
        bedrooms: 3,
        bathrooms: 2,
        size_sqft: 1_720,
        year_built: Some(1978),
        category: "Single-Family Homes",
        featured: false,
        amenities: &["Covered Parking"],
        features: &["Fireplace"],
        gallery: &["https://images.unsplash.com/photo-1580587771525-78b9dba3b914?w=1200"],
    },
    PropertyFixture {
        title: "Brick Row Townhouse",
        description: "Three stories with a private roof terrace near the park.",
        property_type: PropertyType::Townhouse,
        status: ListingStatus::ForSale,
        price: 735_000,
        address: "17 Baker Row",
        city: "Portland",
        state: "OR",
        zip_code: "97209",
        bedrooms: 3,
        bathrooms: 3,
        size_sqft: 2_100,
        year_built: Some(2014),
        category: "Townhouses",
        featured: true,
        amenities: &["Rooftop Deck", "Pet Friendly"],
        features: &["Hardwood Floors", "Walk-in Closet"],
        gallery: &["https://images.unsplash.com/photo-1605276374104-dee2a0ed3cd6?w=1200"],
    },
    PropertyFixture {
        title: "Willow Creek Neighborhood",
        description: "Master-planned community with trails, a playground and pool club.",
        property_type: PropertyType::Neighborhood,
        status: ListingStatus::ForSale,
        price: 449_000,
        address: "1 Willow Creek Pkwy",
        city: "Round Rock",
        state: "TX",
        zip_code: "78665",
        bedrooms: 4,
        bathrooms: 3,
        size_sqft: 2_400,
        year_built: Some(2023),
        category: "Neighborhoods",
        featured: true,
        amenities: &["Swimming Pool", "Playground", "Fitness Center"],
        features: &["Open Floor Plan", "Smart Home"],
        gallery: &[
            "https://images.unsplash.com/photo-1449844908441-8829872d2607?w=1200",
            "https://images.unsplash.com/photo-1512917774080-9991f1c4c750?w=1200",
        ],
    },
    PropertyFixture {
        title: "Harbor Point Neighborhood",
        description: "Waterfront homesites with a marina and community clubhouse.",
        property_type: PropertyType::Neighborhood,
        status: ListingStatus::ForSale,
        price: 615_000,
        address: "200 Harbor Point Blvd",
        city: "Tampa",
        state: "FL",
        zip_code: "33602",
        bedrooms: 4,
        bathrooms: 3,
        size_sqft: 2_650,
        year_built: Some(2021),
        category: "Neighborhoods",
        featured: false,
        amenities: &["Swimming Pool", "Playground", "Concierge"],
        features: &["Chef's Kitchen"],
        gallery: &["https://images.unsplash.com/photo-1564013799919-ab600027ffc6?w=1200"],
    },
    PropertyFixture {
        title: "Hill Country Acreage",
        description: "Five wooded acres with utilities at the road. Sold.",
        property_type: PropertyType::Land,
        status: ListingStatus::Sold,
        price: 210_000,
        address: "County Rd 120",
        city: "Dripping Springs",
        state: "TX",
        zip_code: "78620",
        bedrooms: 0,
        bathrooms: 0,
        size_sqft: 217_800,
        year_built: None,
        category: "Land",
        featured: false,
        amenities: &[],
        features: &[],
        gallery: &["https://images.unsplash.com/photo-1500382017468-9049fed747ef?w=1200"],
    },
];

const CONTENT: &[(&str, &str, &str)] = &[
    (
        "home-hero",
        "Find the place you'll call home",
        "Condos, family homes and whole neighborhoods, hand-picked by local agents.",
    ),
    (
        "about",
        "About Estate",
        "We are a small brokerage focused on honest pricing and quick answers.",
    ),
    (
        "contact-intro",
        "Talk to an agent",
        "Send us a note and an agent will reply within one business day.",
    ),
    (
        "footer",
        "Estate",
        "Licensed real-estate brokerage. Equal housing opportunity.",
    ),
];

fn lookup(ids: &HashMap<&str, Uuid>, kind: &str, name: &str) -> AppResult<Uuid> {
    ids.get(name)
        .copied()
        .ok_or_else(|| AppError::Message(format!("Seed {} '{}' is not defined", kind, name)))
}

fn to_changes(fixture: &PropertyFixture, category_id: Uuid) -> PropertyChanges {
    PropertyChanges {
        title: Some(fixture.title.to_string()),
        description: Some(fixture.description.to_string()),
        property_type: Some(fixture.property_type),
        status: Some(fixture.status),
        price: Some(Decimal::new(fixture.price, 0)),
        address: Some(fixture.address.to_string()),
        city: Some(fixture.city.to_string()),
        state: Some(fixture.state.to_string()),
        zip_code: Some(fixture.zip_code.to_string()),
        bedrooms: Some(fixture.bedrooms),
        bathrooms: Some(fixture.bathrooms),
        size_sqft: Some(fixture.size_sqft),
        year_built: fixture.year_built,
        category_id: Some(category_id),
        featured: Some(fixture.featured),
        image_url: fixture.gallery.first().map(|url| url.to_string()),
    }
}

/// Upsert every fixture in dependency order
pub async fn run(state: &AppState, admin: &AdminCredentials) -> AppResult<SeedSummary> {
    let mut summary = SeedSummary::default();

    let mut categories = HashMap::new();
    for (name, description) in CATEGORIES {
        let category = state.category_repo.upsert_by_name(name, Some(*description)).await?;
        categories.insert(*name, category.id);
        summary.categories += 1;
    }
    info!("✓ Seeded {} categories", summary.categories);

    let mut amenities = HashMap::new();
    for (name, icon) in AMENITIES {
        let amenity = state.amenity_repo.upsert_by_name(name, Some(*icon)).await?;
        amenities.insert(*name, amenity.id);
        summary.amenities += 1;
    }

    let mut features = HashMap::new();
    for (name, description) in FEATURES {
        let feature = state.feature_repo.upsert_by_name(name, Some(*description)).await?;
        features.insert(*name, feature.id);
        summary.features += 1;
    }
    info!(
        "✓ Seeded {} amenities and {} features",
        summary.amenities, summary.features
    );

    let admin_hash = auth::hash_password(&admin.password).await?;
    let admin_user = state
        .user_repo
        .upsert_by_email(&admin.email, "Site Admin", &admin_hash, UserRole::Admin, None)
        .await?;
    let agent_hash = auth::hash_password(AGENT_PASSWORD).await?;
    let agent = state
        .user_repo
        .upsert_by_email(
            AGENT_EMAIL,
            "Demo Agent",
            &agent_hash,
            UserRole::Agent,
            Some("555-0100"),
        )
        .await?;
    summary.users = 2;
    info!("✓ Seeded admin {} and agent {}", admin_user.email, agent.email);

    for fixture in PROPERTIES {
        let category_id = lookup(&categories, "category", fixture.category)?;
        let changes = to_changes(fixture, category_id);

        let property_id = match state.property_repo.find_by_title(fixture.title).await? {
            Some(existing) => {
                state.property_repo.update(existing.id, &changes).await?;
                summary.properties_updated += 1;
                existing.id
            }
            None => {
                let new = NewProperty::from_changes(&changes, Some(agent.id))
                    .map_err(AppError::Validation)?;
                let created = state.property_repo.create(&new).await?;
                summary.properties_created += 1;
                created.id
            }
        };

        let amenity_ids = fixture
            .amenities
            .iter()
            .map(|name| lookup(&amenities, "amenity", name))
            .collect::<AppResult<Vec<_>>>()?;
        let feature_ids = fixture
            .features
            .iter()
            .map(|name| lookup(&features, "feature", name))
            .collect::<AppResult<Vec<_>>>()?;
        state.property_repo.set_amenities(property_id, &amenity_ids).await?;
        state.property_repo.set_features(property_id, &feature_ids).await?;

        for url in fixture.gallery {
            if !state.image_repo.exists(property_id, url).await? {
                state.image_repo.append(property_id, url, None).await?;
                summary.images_added += 1;
            }
        }
    }
    info!(
        "✓ Seeded properties ({} created, {} updated, {} images added)",
        summary.properties_created, summary.properties_updated, summary.images_added
    );

    for (key, title, body) in CONTENT {
        state.content_repo.upsert(key, Some(*title), body).await?;
        summary.content_blocks += 1;
    }
    info!("✓ Seeded {} content blocks", summary.content_blocks);

    Ok(summary)
}
