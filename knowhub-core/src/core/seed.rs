//! Static example dataset the library is rebuilt from on every launch.

use crate::{ContentItem, ContentKind, Dimensions, Folder, Stage};
use chrono::{DateTime, TimeZone, Utc};

fn at(day: u32, hour: u32, minute: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, day, hour, minute, 0)
        .single()
        .unwrap_or_default()
}

fn item(
    id: &str,
    title: &str,
    content: &str,
    kind: ContentKind,
    stage: Stage,
    tags: &[&str],
    folder_id: Option<&str>,
    created_at: DateTime<Utc>,
) -> ContentItem {
    ContentItem {
        id: id.to_string(),
        title: title.to_string(),
        content: content.to_string(),
        kind,
        stage,
        tags: tags.iter().map(|t| t.to_string()).collect(),
        folder_id: folder_id.map(str::to_string),
        created_at,
        updated_at: created_at,
    }
}

/// Returns the seed content items, newest first.
pub fn seed_items() -> Vec<ContentItem> {
    let text = || ContentKind::Text { author: None };
    let image = || ContentKind::Image { dimensions: None, file_size: None };
    vec![
        item(
            "1",
            "Design system ideas",
            "Exploring a new approach to component libraries and design tokens, with a focus on accessibility and developer experience.",
            text(),
            Stage::Review,
            &["design", "system", "components"],
            Some("design"),
            at(15, 10, 30),
        ),
        item(
            "2",
            "User research findings",
            "Key insights from user interviews about content organization preferences.",
            text(),
            Stage::Refine,
            &["research", "users", "insights"],
            Some("research"),
            at(14, 14, 20),
        ),
        item(
            "3",
            "API documentation",
            "A comprehensive guide to the new content management API endpoints.",
            text(),
            Stage::Consolidate,
            &["api", "documentation", "development"],
            Some("development"),
            at(13, 9, 15),
        ),
        item(
            "4",
            "Wireframe concepts",
            "Early wireframes for the new dashboard layout.",
            ContentKind::Image {
                dimensions: Some(Dimensions { width: 1440, height: 900 }),
                file_size: Some(482_113),
            },
            Stage::Review,
            &["wireframes", "design", "dashboard"],
            Some("design"),
            at(12, 16, 45),
        ),
        item(
            "5",
            "Competitor analysis",
            "An analysis of similar tools on the market and their key features.",
            ContentKind::Link { url: "https://example.com/analysis".to_string() },
            Stage::Refine,
            &["analysis", "competitors", "market"],
            Some("marketing"),
            at(11, 11, 30),
        ),
        item(
            "6",
            "Meeting notes",
            "Weekly team sync notes and action items.",
            text(),
            Stage::Consolidate,
            &["meetings", "notes", "team"],
            None,
            at(10, 13, 0),
        ),
        item(
            "7",
            "UI pattern library",
            "A collection of reusable UI patterns and components.",
            image(),
            Stage::Review,
            &["ui", "patterns", "library"],
            Some("design"),
            at(9, 15, 20),
        ),
        item(
            "8",
            "Development guidelines",
            "Project coding standards and best practices.",
            text(),
            Stage::Consolidate,
            &["development", "guidelines", "standards"],
            Some("development"),
            at(8, 11, 10),
        ),
        item(
            "9",
            "User flow diagram",
            "Primary user journeys and interaction flows.",
            image(),
            Stage::Refine,
            &["userflow", "diagram", "ux"],
            Some("research"),
            at(7, 9, 30),
        ),
        item(
            "10",
            "Product walkthrough",
            "Recorded walkthrough of the onboarding flow.",
            ContentKind::Video {
                url: Some("https://video.example.com/watch/onboarding".to_string()),
                author: Some("Product team".to_string()),
                views: Some(128),
            },
            Stage::Review,
            &["onboarding", "video", "product"],
            None,
            at(6, 14, 45),
        ),
    ]
}

/// Returns the seed folders shown in the sidebar.
pub fn seed_folders() -> Vec<Folder> {
    let created_at = at(1, 0, 0);
    let folder = |id: &str, name: &str, color: &str, item_count: usize| Folder {
        id: id.to_string(),
        name: name.to_string(),
        color: color.to_string(),
        item_count,
        created_at,
        parent_id: None,
    };
    vec![
        folder("design", "Design", "#3B82F6", 25),
        folder("development", "Development", "#10B981", 34),
        folder("research", "Research", "#8B5CF6", 18),
        folder("marketing", "Marketing", "#F59E0B", 12),
    ]
}
