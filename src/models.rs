use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub email: String,
    pub password: String, // plaintext by design, no auth layer here
    pub full_name: String,
    pub user_type: String, // "student", "company", "admin"
    pub created_at: String,
    pub profile_photo: Option<String>,
    pub bio: String,
    pub phone: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Company {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub industry: String,
    pub website: String,
    pub logo: String,
    pub location: String,
    pub size: String, // "small", "medium", "large", "enterprise"
    pub founded: i32,
    pub average_rating: f64, // derived from reviews, recomputed on add
    pub total_reviews: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Internship {
    pub id: i64,
    pub company_id: i64, // unchecked reference
    pub title: String,
    pub description: String,
    pub location: String,
    pub remote_type: String, // "on-site", "hybrid", "remote"
    pub duration_months: i64,
    pub salary_min: i64,
    pub salary_max: i64,
    pub required_skills: String,
    pub posted_date: String,
    pub deadline: String,
    pub status: String, // "open", "closed"
    pub applications_count: i64,
    pub views_count: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Review {
    pub id: i64,
    pub company_id: i64,
    pub user_id: i64,
    pub user_name: String, // denormalized; "Anonymous" when is_anonymous
    pub rating: i64,       // 1-5
    pub title: String,
    pub comment: String,
    pub is_anonymous: bool,
    pub helpful_count: i64,
    pub created_at: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Application {
    pub id: i64,
    pub internship_id: i64,
    pub student_id: i64,
    pub student_name: String, // denormalized for convenience
    pub status: String,       // "submitted", "reviewing", "accepted", "rejected"
    pub applied_at: String,
    pub cover_letter: String,
    pub cv_url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Contact {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
    pub status: String, // "new", "handled"
    pub submitted_at: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SavedInternship {
    pub id: i64,
    pub user_id: i64,
    pub internship_id: i64,
    pub saved_at: String,
}

/// Partial profile update; `None` fields are left untouched.
#[derive(Debug, Clone, Default)]
pub struct ProfileUpdate {
    pub email: Option<String>,
    pub password: Option<String>,
    pub full_name: Option<String>,
    pub bio: Option<String>,
    pub phone: Option<String>,
    pub profile_photo: Option<String>,
}
