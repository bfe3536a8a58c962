#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Category {
    pub id: &'static str,
    pub name: &'static str,
}

pub const CATEGORIES: &[Category] = &[
    Category { id: "mobiles", name: "Mobiles" },
    Category { id: "electronics", name: "Electronics & Appliances" },
    Category { id: "cars", name: "Cars" },
    Category { id: "bikes", name: "Motorcycles" },
    Category { id: "furniture", name: "Furniture" },
    Category { id: "fashion", name: "Fashion" },
    Category { id: "real_estate", name: "Real Estate" },
    Category { id: "services", name: "Services" },
    Category { id: "jobs", name: "Jobs" },
    Category { id: "pets", name: "Pets" },
    Category { id: "education", name: "Books, Sports & Hobbies" },
    Category { id: "commercial", name: "Commercial Vehicles & Spares" },
];

pub fn find(id: &str) -> Option<&'static Category> {
    CATEGORIES.iter().find(|category| category.id == id)
}
