use std::path::PathBuf;

use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::warn;

use crate::error::StoreError;
use crate::models::{
    Application, Company, Contact, Internship, ProfileUpdate, Review, SavedInternship, User,
};
use crate::seed;

const USERS: &str = "users";
const COMPANIES: &str = "companies";
const INTERNSHIPS: &str = "internships";
const REVIEWS: &str = "reviews";
const APPLICATIONS: &str = "applications";
const CONTACTS: &str = "contacts";
const SAVED_INTERNSHIPS: &str = "saved_internships";
const CURRENT_USER: &str = "current_user";

/// Key-value store holding one JSON-encoded collection per key, the same
/// layout the platform used in the browser. Backed by a single-file SQLite
/// database.
pub struct Store {
    conn: Connection,
    path: PathBuf,
}

impl Store {
    pub fn open() -> Result<Self, StoreError> {
        let path = Self::default_path();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| StoreError::Storage(e.to_string()))?;
        }
        let conn = Connection::open(&path)?;
        Ok(Self { conn, path })
    }

    pub fn open_in_memory() -> Result<Self, StoreError> {
        let conn = Connection::open_in_memory()?;
        Ok(Self {
            conn,
            path: PathBuf::from(":memory:"),
        })
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    fn default_path() -> PathBuf {
        // Use XDG data directory or fallback
        if let Some(proj_dirs) = directories::ProjectDirs::from("", "", "esibridge") {
            proj_dirs.data_dir().join("esibridge.db")
        } else {
            PathBuf::from("esibridge.db")
        }
    }

    /// Ensure every collection exists, seeding companies and internships
    /// with the default dataset. Idempotent: existing collections are left
    /// untouched.
    pub fn init(&self) -> Result<(), StoreError> {
        self.conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS kv (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL
            );
            "#,
        )?;

        self.seed_if_absent(USERS, &Vec::<User>::new())?;
        self.seed_if_absent(COMPANIES, &seed::default_companies())?;
        self.seed_if_absent(INTERNSHIPS, &seed::default_internships())?;
        self.seed_if_absent(REVIEWS, &Vec::<Review>::new())?;
        self.seed_if_absent(APPLICATIONS, &Vec::<Application>::new())?;
        self.seed_if_absent(CONTACTS, &Vec::<Contact>::new())?;
        self.seed_if_absent(SAVED_INTERNSHIPS, &Vec::<SavedInternship>::new())?;
        Ok(())
    }

    fn seed_if_absent<T: Serialize>(&self, key: &str, default: &[T]) -> Result<(), StoreError> {
        if self.get_raw(key)?.is_none() {
            self.write(key, default)?;
        }
        Ok(())
    }

    // --- KV layer ---

    fn get_raw(&self, key: &str) -> Result<Option<String>, rusqlite::Error> {
        self.conn
            .query_row("SELECT value FROM kv WHERE key = ?1", [key], |row| {
                row.get(0)
            })
            .optional()
    }

    fn set_raw(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.conn.execute(
            "INSERT INTO kv (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value",
            params![key, value],
        )?;
        Ok(())
    }

    fn remove_raw(&self, key: &str) -> Result<(), StoreError> {
        self.conn
            .execute("DELETE FROM kv WHERE key = ?1", [key])?;
        Ok(())
    }

    /// Read a collection. Absent keys and malformed JSON both degrade to an
    /// empty collection; read failures never reach the caller.
    fn read<T: DeserializeOwned>(&self, key: &str) -> Vec<T> {
        let raw = match self.get_raw(key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Vec::new(),
            Err(e) => {
                warn!(key, error = %e, "failed to read collection");
                return Vec::new();
            }
        };
        match serde_json::from_str(&raw) {
            Ok(items) => items,
            Err(e) => {
                warn!(key, error = %e, "malformed collection, treating as empty");
                Vec::new()
            }
        }
    }

    fn write<T: Serialize>(&self, key: &str, items: &[T]) -> Result<(), StoreError> {
        let raw = serde_json::to_string(items)?;
        self.set_raw(key, &raw)
    }

    // --- Users & session ---

    pub fn register_user(
        &self,
        email: &str,
        password: &str,
        full_name: &str,
        user_type: &str,
    ) -> Result<User, StoreError> {
        let mut users: Vec<User> = self.read(USERS);
        if users.iter().any(|u| u.email == email) {
            return Err(StoreError::DuplicateEmail);
        }
        let user = User {
            id: next_id(&users, |u| u.id),
            email: email.to_string(),
            password: password.to_string(),
            full_name: full_name.to_string(),
            user_type: user_type.to_string(),
            created_at: Utc::now().to_rfc3339(),
            profile_photo: None,
            bio: String::new(),
            phone: String::new(),
        };
        users.push(user.clone());
        self.write(USERS, &users)?;
        Ok(user)
    }

    /// First (email, password) match wins. On success the matched record is
    /// copied into the session key; later edits to the users collection do
    /// not propagate to the copy.
    pub fn login_user(&self, email: &str, password: &str) -> Result<User, StoreError> {
        let users: Vec<User> = self.read(USERS);
        let user = users
            .into_iter()
            .find(|u| u.email == email && u.password == password)
            .ok_or(StoreError::InvalidCredentials)?;
        self.set_session(&user)?;
        Ok(user)
    }

    pub fn current_user(&self) -> Option<User> {
        let raw = match self.get_raw(CURRENT_USER) {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(e) => {
                warn!(error = %e, "failed to read session");
                return None;
            }
        };
        match serde_json::from_str(&raw) {
            Ok(user) => Some(user),
            Err(e) => {
                warn!(error = %e, "malformed session, treating as logged out");
                None
            }
        }
    }

    /// Clears the session unconditionally. Has no error path; a failed
    /// delete is logged and the caller proceeds as logged out.
    pub fn logout(&self) {
        if let Err(e) = self.remove_raw(CURRENT_USER) {
            warn!(error = %e, "failed to clear session");
        }
    }

    fn set_session(&self, user: &User) -> Result<(), StoreError> {
        let raw = serde_json::to_string(user)?;
        self.set_raw(CURRENT_USER, &raw)
    }

    /// Shallow merge of the given fields into the matching user. Refreshes
    /// the session copy when the target is the session holder.
    pub fn update_user_profile(
        &self,
        user_id: i64,
        updates: &ProfileUpdate,
    ) -> Result<User, StoreError> {
        let mut users: Vec<User> = self.read(USERS);
        let user = users
            .iter_mut()
            .find(|u| u.id == user_id)
            .ok_or(StoreError::NotFound("user"))?;

        if let Some(email) = &updates.email {
            user.email = email.clone();
        }
        if let Some(password) = &updates.password {
            user.password = password.clone();
        }
        if let Some(full_name) = &updates.full_name {
            user.full_name = full_name.clone();
        }
        if let Some(bio) = &updates.bio {
            user.bio = bio.clone();
        }
        if let Some(phone) = &updates.phone {
            user.phone = phone.clone();
        }
        if let Some(photo) = &updates.profile_photo {
            user.profile_photo = Some(photo.clone());
        }
        let merged = user.clone();
        self.write(USERS, &users)?;

        if let Some(session) = self.current_user() {
            if session.id == user_id {
                self.set_session(&merged)?;
            }
        }
        Ok(merged)
    }

    pub fn user_by_email(&self, email: &str) -> Option<User> {
        self.read::<User>(USERS)
            .into_iter()
            .find(|u| u.email == email)
    }

    // --- Companies & internships (pure reads) ---

    pub fn companies(&self) -> Vec<Company> {
        self.read(COMPANIES)
    }

    pub fn company_by_id(&self, company_id: i64) -> Option<Company> {
        self.companies().into_iter().find(|c| c.id == company_id)
    }

    pub fn internships(&self) -> Vec<Internship> {
        self.read(INTERNSHIPS)
    }

    pub fn internship_by_id(&self, internship_id: i64) -> Option<Internship> {
        self.internships()
            .into_iter()
            .find(|i| i.id == internship_id)
    }

    pub fn internships_by_company(&self, company_id: i64) -> Vec<Internship> {
        self.internships()
            .into_iter()
            .filter(|i| i.company_id == company_id)
            .collect()
    }

    // --- Reviews ---

    pub fn add_review(
        &self,
        session: Option<&User>,
        company_id: i64,
        rating: i64,
        title: &str,
        comment: &str,
        is_anonymous: bool,
    ) -> Result<Review, StoreError> {
        let user = session.ok_or(StoreError::Unauthenticated)?;
        let mut reviews: Vec<Review> = self.read(REVIEWS);
        let review = Review {
            id: next_id(&reviews, |r| r.id),
            company_id,
            user_id: user.id,
            user_name: if is_anonymous {
                "Anonymous".to_string()
            } else {
                user.full_name.clone()
            },
            rating,
            title: title.to_string(),
            comment: comment.to_string(),
            is_anonymous,
            helpful_count: 0,
            created_at: Utc::now().to_rfc3339(),
        };
        reviews.push(review.clone());
        self.write(REVIEWS, &reviews)?;
        self.recompute_company_rating(company_id);
        Ok(review)
    }

    /// All reviews for a company, most recent first. The descending order is
    /// part of the contract, not a display choice.
    pub fn reviews_for_company(&self, company_id: i64) -> Vec<Review> {
        let mut reviews: Vec<Review> = self
            .read::<Review>(REVIEWS)
            .into_iter()
            .filter(|r| r.company_id == company_id)
            .collect();
        reviews.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        reviews
    }

    /// Author or admin only. Deleting does NOT recompute the company
    /// aggregate; the rating goes stale, matching add-only recomputation.
    pub fn delete_review(
        &self,
        session: Option<&User>,
        review_id: i64,
    ) -> Result<(), StoreError> {
        let user = session.ok_or(StoreError::Unauthenticated)?;
        let mut reviews: Vec<Review> = self.read(REVIEWS);
        let pos = reviews
            .iter()
            .position(|r| r.id == review_id)
            .ok_or(StoreError::NotFound("review"))?;
        if reviews[pos].user_id != user.id && user.user_type != "admin" {
            return Err(StoreError::Forbidden);
        }
        reviews.remove(pos);
        self.write(REVIEWS, &reviews)?;
        Ok(())
    }

    /// Average (mean rounded to 2 decimals) and count over the company's
    /// reviews. Skipped entirely when no reviews remain, leaving the stored
    /// aggregate stale. A failed write here does not fail the caller.
    fn recompute_company_rating(&self, company_id: i64) {
        let ratings: Vec<i64> = self
            .read::<Review>(REVIEWS)
            .into_iter()
            .filter(|r| r.company_id == company_id)
            .map(|r| r.rating)
            .collect();
        if ratings.is_empty() {
            return;
        }
        let average =
            (ratings.iter().sum::<i64>() as f64 / ratings.len() as f64 * 100.0).round() / 100.0;

        let mut companies: Vec<Company> = self.read(COMPANIES);
        if let Some(company) = companies.iter_mut().find(|c| c.id == company_id) {
            company.average_rating = average;
            company.total_reviews = ratings.len() as i64;
            if let Err(e) = self.write(COMPANIES, &companies) {
                warn!(company_id, error = %e, "failed to update company rating");
            }
        }
    }

    // --- Applications ---

    /// One application per (internship, student). The applications_count
    /// bump is a silent no-op when the internship id is unknown.
    pub fn apply_for_internship(
        &self,
        session: Option<&User>,
        internship_id: i64,
    ) -> Result<Application, StoreError> {
        let user = session.ok_or(StoreError::Unauthenticated)?;
        let mut applications: Vec<Application> = self.read(APPLICATIONS);
        if applications
            .iter()
            .any(|a| a.internship_id == internship_id && a.student_id == user.id)
        {
            return Err(StoreError::DuplicateApplication);
        }
        let application = Application {
            id: next_id(&applications, |a| a.id),
            internship_id,
            student_id: user.id,
            student_name: user.full_name.clone(),
            status: "submitted".to_string(),
            applied_at: Utc::now().to_rfc3339(),
            cover_letter: String::new(),
            cv_url: String::new(),
        };
        applications.push(application.clone());
        self.write(APPLICATIONS, &applications)?;

        let mut internships: Vec<Internship> = self.read(INTERNSHIPS);
        if let Some(internship) = internships.iter_mut().find(|i| i.id == internship_id) {
            internship.applications_count += 1;
            self.write(INTERNSHIPS, &internships)?;
        }
        Ok(application)
    }

    pub fn user_applications(&self, user_id: i64) -> Vec<Application> {
        self.read::<Application>(APPLICATIONS)
            .into_iter()
            .filter(|a| a.student_id == user_id)
            .collect()
    }

    // --- Saved internships ---

    pub fn save_internship(
        &self,
        session: Option<&User>,
        internship_id: i64,
    ) -> Result<SavedInternship, StoreError> {
        let user = session.ok_or(StoreError::Unauthenticated)?;
        let mut saved: Vec<SavedInternship> = self.read(SAVED_INTERNSHIPS);
        if saved
            .iter()
            .any(|s| s.user_id == user.id && s.internship_id == internship_id)
        {
            return Err(StoreError::AlreadySaved);
        }
        let entry = SavedInternship {
            id: next_id(&saved, |s| s.id),
            user_id: user.id,
            internship_id,
            saved_at: Utc::now().to_rfc3339(),
        };
        saved.push(entry.clone());
        self.write(SAVED_INTERNSHIPS, &saved)?;
        Ok(entry)
    }

    pub fn unsave_internship(
        &self,
        session: Option<&User>,
        internship_id: i64,
    ) -> Result<(), StoreError> {
        let user = session.ok_or(StoreError::Unauthenticated)?;
        let mut saved: Vec<SavedInternship> = self.read(SAVED_INTERNSHIPS);
        let pos = saved
            .iter()
            .position(|s| s.user_id == user.id && s.internship_id == internship_id)
            .ok_or(StoreError::NotFound("saved internship"))?;
        saved.remove(pos);
        self.write(SAVED_INTERNSHIPS, &saved)?;
        Ok(())
    }

    pub fn saved_internships(&self, user_id: i64) -> Vec<SavedInternship> {
        self.read::<SavedInternship>(SAVED_INTERNSHIPS)
            .into_iter()
            .filter(|s| s.user_id == user_id)
            .collect()
    }

    // --- Contacts ---

    pub fn submit_contact(
        &self,
        name: &str,
        email: &str,
        subject: &str,
        message: &str,
    ) -> Result<Contact, StoreError> {
        let mut contacts: Vec<Contact> = self.read(CONTACTS);
        let contact = Contact {
            id: next_id(&contacts, |c| c.id),
            name: name.to_string(),
            email: email.to_string(),
            subject: subject.to_string(),
            message: message.to_string(),
            status: "new".to_string(),
            submitted_at: Utc::now().to_rfc3339(),
        };
        contacts.push(contact.clone());
        self.write(CONTACTS, &contacts)?;
        Ok(contact)
    }
}

fn next_id<T>(items: &[T], id_of: impl Fn(&T) -> i64) -> i64 {
    items.iter().map(id_of).max().unwrap_or(0) + 1
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> Store {
        let store = Store::open_in_memory().unwrap();
        store.init().unwrap();
        store
    }

    fn register(store: &Store, email: &str, name: &str) -> User {
        store.register_user(email, "hunter2", name, "student").unwrap()
    }

    #[test]
    fn duplicate_email_is_rejected() {
        let store = store();
        register(&store, "sara@esi.ac.ma", "Sara B");
        let err = store
            .register_user("sara@esi.ac.ma", "other", "Other", "student")
            .unwrap_err();
        assert!(matches!(err, StoreError::DuplicateEmail));
        assert_eq!(store.read::<User>(USERS).len(), 1);
    }

    #[test]
    fn email_match_is_case_sensitive() {
        let store = store();
        register(&store, "sara@esi.ac.ma", "Sara B");
        // Exact-match semantics: a different casing registers fine
        assert!(store
            .register_user("Sara@esi.ac.ma", "pw", "Sara B", "student")
            .is_ok());
    }

    #[test]
    fn login_with_wrong_password_fails_and_leaves_session_unset() {
        let store = store();
        register(&store, "sara@esi.ac.ma", "Sara B");
        let err = store.login_user("sara@esi.ac.ma", "wrong").unwrap_err();
        assert!(matches!(err, StoreError::InvalidCredentials));
        assert!(store.current_user().is_none());
    }

    #[test]
    fn register_then_login_round_trips_the_record() {
        let store = store();
        let registered = register(&store, "sara@esi.ac.ma", "Sara B");
        let logged_in = store.login_user("sara@esi.ac.ma", "hunter2").unwrap();
        assert_eq!(registered, logged_in);
        assert_eq!(store.current_user(), Some(logged_in));
    }

    #[test]
    fn logout_clears_the_session() {
        let store = store();
        register(&store, "sara@esi.ac.ma", "Sara B");
        store.login_user("sara@esi.ac.ma", "hunter2").unwrap();
        store.logout();
        assert!(store.current_user().is_none());
        // Unconditional: logging out twice is fine
        store.logout();
    }

    #[test]
    fn profile_update_merges_and_refreshes_session() {
        let store = store();
        let user = register(&store, "sara@esi.ac.ma", "Sara B");
        store.login_user("sara@esi.ac.ma", "hunter2").unwrap();

        let updates = ProfileUpdate {
            bio: Some("Data science student".to_string()),
            phone: Some("+212 600 000 000".to_string()),
            ..Default::default()
        };
        let merged = store.update_user_profile(user.id, &updates).unwrap();
        assert_eq!(merged.bio, "Data science student");
        assert_eq!(merged.phone, "+212 600 000 000");
        // Untouched fields survive the merge
        assert_eq!(merged.email, "sara@esi.ac.ma");
        assert_eq!(merged.full_name, "Sara B");
        // Session copy re-synced
        assert_eq!(store.current_user().unwrap().bio, "Data science student");
    }

    #[test]
    fn profile_update_of_unknown_user_is_not_found() {
        let store = store();
        let err = store
            .update_user_profile(999, &ProfileUpdate::default())
            .unwrap_err();
        assert!(matches!(err, StoreError::NotFound("user")));
    }

    #[test]
    fn profile_update_of_other_user_leaves_session_alone() {
        let store = store();
        register(&store, "sara@esi.ac.ma", "Sara B");
        let other = register(&store, "omar@esi.ac.ma", "Omar K");
        store.login_user("sara@esi.ac.ma", "hunter2").unwrap();

        let updates = ProfileUpdate {
            bio: Some("changed".to_string()),
            ..Default::default()
        };
        store.update_user_profile(other.id, &updates).unwrap();
        assert_eq!(store.current_user().unwrap().bio, "");
    }

    #[test]
    fn init_seeds_once_and_is_idempotent() {
        let store = store();
        assert_eq!(store.companies().len(), 5);
        assert_eq!(store.internships().len(), 3);
        register(&store, "sara@esi.ac.ma", "Sara B");
        store.init().unwrap();
        assert_eq!(store.read::<User>(USERS).len(), 1);
        assert_eq!(store.companies().len(), 5);
    }

    #[test]
    fn read_paths_return_sentinels_not_errors() {
        let store = store();
        assert!(store.company_by_id(999).is_none());
        assert!(store.internship_by_id(999).is_none());
        assert!(store.internships_by_company(999).is_empty());
        assert!(store.user_by_email("nobody@esi.ac.ma").is_none());
    }

    #[test]
    fn malformed_collection_reads_as_empty() {
        let store = store();
        store.set_raw(REVIEWS, "{definitely not json").unwrap();
        assert!(store.reviews_for_company(1).is_empty());
        // and the next write repairs the key
        let user = register(&store, "sara@esi.ac.ma", "Sara B");
        store
            .add_review(Some(&user), 1, 5, "Great", "Loved it", false)
            .unwrap();
        assert_eq!(store.reviews_for_company(1).len(), 1);
    }

    #[test]
    fn adding_reviews_recomputes_the_company_aggregate() {
        let store = store();
        let user = register(&store, "sara@esi.ac.ma", "Sara B");
        store
            .add_review(Some(&user), 1, 5, "Great", "Solid mentorship", false)
            .unwrap();
        let other = register(&store, "omar@esi.ac.ma", "Omar K");
        store
            .add_review(Some(&other), 1, 3, "Mixed", "Long commute", false)
            .unwrap();

        let company = store.company_by_id(1).unwrap();
        assert_eq!(company.average_rating, 4.0);
        assert_eq!(company.total_reviews, 2);
    }

    #[test]
    fn average_is_rounded_to_two_decimals() {
        let store = store();
        let user = register(&store, "sara@esi.ac.ma", "Sara B");
        for rating in [5, 4, 4] {
            store
                .add_review(Some(&user), 2, rating, "t", "c", false)
                .unwrap();
        }
        // 13 / 3 = 4.333... -> 4.33
        assert_eq!(store.company_by_id(2).unwrap().average_rating, 4.33);
    }

    #[test]
    fn anonymous_review_masks_the_display_name() {
        let store = store();
        let user = register(&store, "sara@esi.ac.ma", "Sara B");
        let review = store
            .add_review(Some(&user), 1, 4, "Fine", "No comment", true)
            .unwrap();
        assert_eq!(review.user_name, "Anonymous");
        assert_eq!(review.user_id, user.id);
    }

    #[test]
    fn review_requires_a_session() {
        let store = store();
        let err = store
            .add_review(None, 1, 5, "Great", "c", false)
            .unwrap_err();
        assert!(matches!(err, StoreError::Unauthenticated));
    }

    #[test]
    fn deleting_the_only_review_leaves_the_aggregate_stale() {
        let store = store();
        let user = register(&store, "sara@esi.ac.ma", "Sara B");
        let review = store
            .add_review(Some(&user), 2, 5, "Great", "c", false)
            .unwrap();
        let company = store.company_by_id(2).unwrap();
        assert_eq!(company.average_rating, 5.0);
        assert_eq!(company.total_reviews, 1);

        store.delete_review(Some(&user), review.id).unwrap();
        assert!(store.reviews_for_company(2).is_empty());
        // No recomputation on delete: the stored aggregate stays put
        let company = store.company_by_id(2).unwrap();
        assert_eq!(company.average_rating, 5.0);
        assert_eq!(company.total_reviews, 1);
    }

    #[test]
    fn only_author_or_admin_may_delete_a_review() {
        let store = store();
        let author = register(&store, "sara@esi.ac.ma", "Sara B");
        let review = store
            .add_review(Some(&author), 1, 4, "Fine", "c", false)
            .unwrap();

        let stranger = register(&store, "omar@esi.ac.ma", "Omar K");
        let err = store.delete_review(Some(&stranger), review.id).unwrap_err();
        assert!(matches!(err, StoreError::Forbidden));

        let admin = store
            .register_user("admin@esi.ac.ma", "pw", "Admin", "admin")
            .unwrap();
        store.delete_review(Some(&admin), review.id).unwrap();
        assert!(store.reviews_for_company(1).is_empty());
    }

    #[test]
    fn deleting_an_unknown_review_is_not_found() {
        let store = store();
        let user = register(&store, "sara@esi.ac.ma", "Sara B");
        let err = store.delete_review(Some(&user), 999).unwrap_err();
        assert!(matches!(err, StoreError::NotFound("review")));
    }

    #[test]
    fn reviews_list_most_recent_first() {
        let store = store();
        let reviews = vec![
            Review {
                id: 1,
                company_id: 1,
                user_id: 1,
                user_name: "A".to_string(),
                rating: 3,
                title: "oldest".to_string(),
                comment: String::new(),
                is_anonymous: false,
                helpful_count: 0,
                created_at: "2025-01-10T09:00:00+00:00".to_string(),
            },
            Review {
                id: 2,
                company_id: 1,
                user_id: 1,
                user_name: "A".to_string(),
                rating: 4,
                title: "newest".to_string(),
                comment: String::new(),
                is_anonymous: false,
                helpful_count: 0,
                created_at: "2025-03-02T15:30:00+00:00".to_string(),
            },
            Review {
                id: 3,
                company_id: 1,
                user_id: 1,
                user_name: "A".to_string(),
                rating: 5,
                title: "middle".to_string(),
                comment: String::new(),
                is_anonymous: false,
                helpful_count: 0,
                created_at: "2025-02-01T12:00:00+00:00".to_string(),
            },
            Review {
                id: 4,
                company_id: 2,
                user_id: 1,
                user_name: "A".to_string(),
                rating: 1,
                title: "other company".to_string(),
                comment: String::new(),
                is_anonymous: false,
                helpful_count: 0,
                created_at: "2025-04-01T12:00:00+00:00".to_string(),
            },
        ];
        store.write(REVIEWS, &reviews).unwrap();

        let listed = store.reviews_for_company(1);
        let titles: Vec<&str> = listed.iter().map(|r| r.title.as_str()).collect();
        assert_eq!(titles, ["newest", "middle", "oldest"]);
    }

    #[test]
    fn double_application_is_rejected_and_count_bumps_once() {
        let store = store();
        let user = register(&store, "sara@esi.ac.ma", "Sara B");
        let before = store.internship_by_id(1).unwrap().applications_count;

        let application = store.apply_for_internship(Some(&user), 1).unwrap();
        assert_eq!(application.status, "submitted");
        assert_eq!(application.student_id, user.id);

        let err = store.apply_for_internship(Some(&user), 1).unwrap_err();
        assert!(matches!(err, StoreError::DuplicateApplication));

        assert_eq!(
            store.internship_by_id(1).unwrap().applications_count,
            before + 1
        );
        assert_eq!(store.user_applications(user.id).len(), 1);
    }

    #[test]
    fn applying_to_an_unknown_internship_still_records_the_application() {
        let store = store();
        let user = register(&store, "sara@esi.ac.ma", "Sara B");
        // No internship 999: the count bump is a silent no-op
        store.apply_for_internship(Some(&user), 999).unwrap();
        assert_eq!(store.user_applications(user.id).len(), 1);
    }

    #[test]
    fn application_requires_a_session() {
        let store = store();
        let err = store.apply_for_internship(None, 1).unwrap_err();
        assert!(matches!(err, StoreError::Unauthenticated));
    }

    #[test]
    fn saved_internships_are_unique_per_user() {
        let store = store();
        let user = register(&store, "sara@esi.ac.ma", "Sara B");
        store.save_internship(Some(&user), 2).unwrap();
        let err = store.save_internship(Some(&user), 2).unwrap_err();
        assert!(matches!(err, StoreError::AlreadySaved));

        let other = register(&store, "omar@esi.ac.ma", "Omar K");
        store.save_internship(Some(&other), 2).unwrap();
        assert_eq!(store.saved_internships(user.id).len(), 1);

        store.unsave_internship(Some(&user), 2).unwrap();
        assert!(store.saved_internships(user.id).is_empty());
        let err = store.unsave_internship(Some(&user), 2).unwrap_err();
        assert!(matches!(err, StoreError::NotFound("saved internship")));
    }

    #[test]
    fn contact_submissions_always_append() {
        let store = store();
        store
            .submit_contact("Sara", "sara@esi.ac.ma", "Question", "Hello")
            .unwrap();
        store
            .submit_contact("Sara", "sara@esi.ac.ma", "Question", "Hello")
            .unwrap();
        let contacts: Vec<Contact> = store.read(CONTACTS);
        assert_eq!(contacts.len(), 2);
        assert!(contacts.iter().all(|c| c.status == "new"));
        assert_eq!(contacts[1].id, 2);
    }

    #[test]
    fn ids_are_monotonic_per_collection() {
        let store = store();
        let first = register(&store, "a@esi.ac.ma", "A");
        let second = register(&store, "b@esi.ac.ma", "B");
        assert_eq!(second.id, first.id + 1);
        // Internships are seeded through id 3, so a new record continues
        let apps = store.apply_for_internship(Some(&first), 1).unwrap();
        assert_eq!(apps.id, 1);
    }
}
