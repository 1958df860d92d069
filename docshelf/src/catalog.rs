//! Default taxonomy template
//!
//! Every new user is seeded with these categories and subcategories. The ids
//! are stable literals that become row ids, so they must never be renamed:
//! seeding compares against them on every run and documents reference them.

use crate::database::{NewCategory, NewSubcategory};

/// A default category and its ordered subcategories
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CategoryTemplate {
    pub id: &'static str,
    pub name: &'static str,
    pub icon: &'static str,
    pub color: &'static str,
    pub subcategories: &'static [SubcategoryTemplate],
}

/// A default subcategory
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubcategoryTemplate {
    pub id: &'static str,
    pub name: &'static str,
    pub icon: &'static str,
    pub color: &'static str,
}

const fn sub(
    id: &'static str,
    name: &'static str,
    icon: &'static str,
    color: &'static str,
) -> SubcategoryTemplate {
    SubcategoryTemplate {
        id,
        name,
        icon,
        color,
    }
}

static CATALOG: &[CategoryTemplate] = &[
    CategoryTemplate {
        id: "personal",
        name: "Personal & Identity",
        icon: "id-card",
        color: "#6366F1",
        subcategories: &[
            sub("personal-passport", "Passport", "passport", "#818CF8"),
            sub("personal-national-id", "National ID", "id-card", "#818CF8"),
            sub("personal-drivers-license", "Driver's License", "car", "#818CF8"),
            sub("personal-birth-certificate", "Birth Certificate", "baby", "#818CF8"),
            sub("personal-marriage-certificate", "Marriage Certificate", "rings", "#818CF8"),
            sub("personal-social-security", "Social Security", "shield-check", "#818CF8"),
        ],
    },
    CategoryTemplate {
        id: "finance",
        name: "Finance",
        icon: "wallet",
        color: "#16A34A",
        subcategories: &[
            sub("finance-bank-statements", "Bank Statements", "bank", "#4ADE80"),
            sub("finance-tax-returns", "Tax Returns", "calculator", "#4ADE80"),
            sub("finance-invoices", "Invoices", "file-invoice", "#4ADE80"),
            sub("finance-receipts", "Receipts", "receipt", "#4ADE80"),
            sub("finance-investments", "Investments", "chart-line", "#4ADE80"),
            sub("finance-loans", "Loans & Credit", "credit-card", "#4ADE80"),
        ],
    },
    CategoryTemplate {
        id: "health",
        name: "Health",
        icon: "heart-pulse",
        color: "#DC2626",
        subcategories: &[
            sub("health-medical-records", "Medical Records", "notes-medical", "#F87171"),
            sub("health-prescriptions", "Prescriptions", "pills", "#F87171"),
            sub("health-lab-results", "Lab Results", "flask", "#F87171"),
            sub("health-insurance", "Health Insurance", "umbrella", "#F87171"),
            sub("health-vaccinations", "Vaccinations", "syringe", "#F87171"),
        ],
    },
    CategoryTemplate {
        id: "home",
        name: "Home & Property",
        icon: "house",
        color: "#F59E0B",
        subcategories: &[
            sub("home-property-deeds", "Property Deeds", "key", "#FCD34D"),
            sub("home-rental-agreements", "Rental Agreements", "file-signature", "#FCD34D"),
            sub("home-utility-bills", "Utility Bills", "bolt", "#FCD34D"),
            sub("home-insurance", "Home Insurance", "house-shield", "#FCD34D"),
            sub("home-warranties", "Warranties & Manuals", "screwdriver", "#FCD34D"),
        ],
    },
    CategoryTemplate {
        id: "work",
        name: "Work & Education",
        icon: "briefcase",
        color: "#0EA5E9",
        subcategories: &[
            sub("work-contracts", "Employment Contracts", "handshake", "#7DD3FC"),
            sub("work-payslips", "Payslips", "money-bill", "#7DD3FC"),
            sub("work-resumes", "Resumes", "user-tie", "#7DD3FC"),
            sub("work-diplomas", "Diplomas", "graduation-cap", "#7DD3FC"),
            sub("work-transcripts", "Transcripts", "scroll", "#7DD3FC"),
            sub("work-certifications", "Certifications", "award", "#7DD3FC"),
        ],
    },
];

/// All default categories, in display order
pub fn categories() -> &'static [CategoryTemplate] {
    CATALOG
}

pub fn find_category(id: &str) -> Option<&'static CategoryTemplate> {
    CATALOG.iter().find(|c| c.id == id)
}

/// Total number of default subcategories across all categories
pub fn subcategory_count() -> usize {
    CATALOG.iter().map(|c| c.subcategories.len()).sum()
}

/// Category rows to seed for `user_id`
pub fn category_rows(user_id: &str) -> Vec<NewCategory> {
    CATALOG
        .iter()
        .map(|c| NewCategory {
            id: c.id.to_string(),
            user_id: user_id.to_string(),
            name: c.name.to_string(),
            icon: c.icon.to_string(),
            background_color: c.color.to_string(),
            is_custom: false,
        })
        .collect()
}

/// Subcategory rows to seed for `user_id`
pub fn subcategory_rows(user_id: &str) -> Vec<NewSubcategory> {
    CATALOG
        .iter()
        .flat_map(|c| {
            c.subcategories.iter().map(move |s| NewSubcategory {
                id: s.id.to_string(),
                category_id: c.id.to_string(),
                user_id: user_id.to_string(),
                name: s.name.to_string(),
                icon: s.icon.to_string(),
                is_custom: false,
            })
        })
        .collect()
}
