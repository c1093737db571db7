//! Static site content: the company profile and the fixed pages of the site.
//!
//! Pages here never change at runtime; they form the baseline of the search
//! index that database content is merged into.

use once_cell::sync::Lazy;
use serde::Serialize;

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ContactChannel {
    pub label: &'static str,
    pub value: &'static str,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CompanyProfile {
    pub name: &'static str,
    pub tagline: &'static str,
    pub founded: u16,
    pub headquarters: &'static str,
    pub summary: &'static str,
    pub values: Vec<&'static str>,
    pub contact: Vec<ContactChannel>,
}

/// A fixed page of the site as known to search.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SitePage {
    pub id: &'static str,
    pub title: &'static str,
    pub path: &'static str,
    pub description: &'static str,
    pub body: &'static str,
    pub category: &'static str,
    pub keywords: &'static [&'static str],
    /// Tie-breaker when two results score the same; higher wins.
    pub priority: u8,
}

pub static COMPANY_PROFILE: Lazy<CompanyProfile> = Lazy::new(|| CompanyProfile {
    name: "Meridian Industrial",
    tagline: "Fluid handling equipment engineered to last",
    founded: 1987,
    headquarters: "Eindhoven, Netherlands",
    summary: "Meridian Industrial designs and manufactures centrifugal pumps, \
              control valves and skid systems for water treatment, chemical \
              processing and energy customers in more than forty countries.",
    values: vec![
        "Engineering integrity",
        "Customer partnership",
        "Safety first",
        "Sustainable manufacturing",
    ],
    contact: vec![
        ContactChannel { label: "Sales", value: "sales@meridian-industrial.com" },
        ContactChannel { label: "Service", value: "service@meridian-industrial.com" },
        ContactChannel { label: "Phone", value: "+31 40 123 4567" },
    ],
});

pub static SITE_PAGES: &[SitePage] = &[
    SitePage {
        id: "home",
        title: "Home",
        path: "/",
        description: "Fluid handling equipment engineered to last.",
        body: "Pumps, valves and skid systems for water treatment, chemical processing and energy.",
        category: "General",
        keywords: &["meridian", "home", "pumps", "valves"],
        priority: 10,
    },
    SitePage {
        id: "about",
        title: "About Us",
        path: "/about",
        description: "Company history, mission and the team behind Meridian Industrial.",
        body: "Founded in 1987 in Eindhoven, we have grown from a machine shop into an \
               international manufacturer with our own foundry and test bench.",
        category: "Company",
        keywords: &["about", "company", "history", "mission", "team"],
        priority: 9,
    },
    SitePage {
        id: "products",
        title: "Products",
        path: "/products",
        description: "Browse centrifugal pumps, control valves and packaged skid systems.",
        body: "Our catalog covers end suction pumps, multistage pumps, butterfly and globe \
               valves, dosing skids and spare parts.",
        category: "Products",
        keywords: &["products", "catalog", "pumps", "valves", "skids"],
        priority: 9,
    },
    SitePage {
        id: "services",
        title: "Services",
        path: "/services",
        description: "Installation, commissioning, maintenance contracts and repairs.",
        body: "Field service engineers support commissioning, preventive maintenance, \
               overhaul and performance testing of installed equipment.",
        category: "Services",
        keywords: &["service", "maintenance", "repair", "installation", "commissioning"],
        priority: 8,
    },
    SitePage {
        id: "quality",
        title: "Quality & Certificates",
        path: "/quality",
        description: "Our quality management system and product certifications.",
        body: "Every unit is hydrostatically tested. We hold ISO 9001, ISO 14001 and ATEX \
               certifications.",
        category: "Company",
        keywords: &["quality", "certificates", "iso", "atex", "certification"],
        priority: 7,
    },
    SitePage {
        id: "sustainability",
        title: "Sustainability",
        path: "/sustainability",
        description: "How we reduce energy use across our plants and products.",
        body: "High efficiency motors, recycled castings and solar power on our assembly \
               halls cut lifecycle emissions.",
        category: "Company",
        keywords: &["sustainability", "energy", "environment", "efficiency"],
        priority: 6,
    },
    SitePage {
        id: "news",
        title: "News",
        path: "/news",
        description: "Company announcements, project stories and trade fair updates.",
        body: "Read the latest updates from Meridian Industrial.",
        category: "News",
        keywords: &["news", "blog", "announcements", "events"],
        priority: 7,
    },
    SitePage {
        id: "careers",
        title: "Careers",
        path: "/careers",
        description: "Open positions and life at Meridian Industrial.",
        body: "Join engineers, machinists and service technicians building equipment that \
               keeps cities supplied with clean water.",
        category: "Careers",
        keywords: &["careers", "jobs", "vacancies", "hiring", "work"],
        priority: 7,
    },
    SitePage {
        id: "contact",
        title: "Contact",
        path: "/contact",
        description: "Reach our sales and service teams.",
        body: "Send us a message, call our office in Eindhoven or find your local \
               distributor.",
        category: "General",
        keywords: &["contact", "email", "phone", "address", "quote"],
        priority: 8,
    },
];

/// Looks up a static page by id.
pub fn page(id: &str) -> Option<&'static SitePage> {
    SITE_PAGES.iter().find(|p| p.id == id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn page_ids_and_paths_are_unique() {
        let ids: HashSet<_> = SITE_PAGES.iter().map(|p| p.id).collect();
        let paths: HashSet<_> = SITE_PAGES.iter().map(|p| p.path).collect();
        assert_eq!(ids.len(), SITE_PAGES.len());
        assert_eq!(paths.len(), SITE_PAGES.len());
    }

    #[test]
    fn keywords_are_lowercase() {
        for p in SITE_PAGES {
            for k in p.keywords {
                assert_eq!(*k, k.to_lowercase(), "page {}", p.id);
            }
        }
    }

    #[test]
    fn lookup_by_id() {
        assert_eq!(page("careers").map(|p| p.path), Some("/careers"));
        assert!(page("missing").is_none());
        assert_eq!(COMPANY_PROFILE.founded, 1987);
    }
}
