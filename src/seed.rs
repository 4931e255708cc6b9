use chrono::{Duration, Utc};

use crate::models::{Company, Internship};

/// Default dataset written on first initialization. Ids start at 1 so the
/// monotonic id counter continues after the seed.
pub fn default_companies() -> Vec<Company> {
    vec![
        Company {
            id: 1,
            name: "ONCF".to_string(),
            description: "Office National des Chemins de Fer".to_string(),
            industry: "Transportation".to_string(),
            website: "https://www.oncf.ma".to_string(),
            logo: "media/image2.png".to_string(),
            location: "Rabat, Morocco".to_string(),
            size: "large".to_string(),
            founded: 1963,
            average_rating: 4.5,
            total_reviews: 5,
        },
        Company {
            id: 2,
            name: "Inwi".to_string(),
            description: "Moroccan Telecommunications Company".to_string(),
            industry: "Telecommunications".to_string(),
            website: "https://www.inwi.ma".to_string(),
            logo: "media/image3.png".to_string(),
            location: "Rabat, Morocco".to_string(),
            size: "large".to_string(),
            founded: 2006,
            average_rating: 4.2,
            total_reviews: 3,
        },
        Company {
            id: 3,
            name: "Oracle".to_string(),
            description: "Global Technology Company".to_string(),
            industry: "Technology".to_string(),
            website: "https://www.oracle.com".to_string(),
            logo: "media/image4.png".to_string(),
            location: "Casablanca, Morocco".to_string(),
            size: "enterprise".to_string(),
            founded: 1977,
            average_rating: 4.7,
            total_reviews: 4,
        },
        Company {
            id: 4,
            name: "3T Développement Maroc".to_string(),
            description: "Multi-brand development company".to_string(),
            industry: "Retail & Fitness".to_string(),
            website: "https://www.3t-dev.com".to_string(),
            logo: "media/image5.png".to_string(),
            location: "Marrakech, Morocco".to_string(),
            size: "medium".to_string(),
            founded: 2016,
            average_rating: 4.0,
            total_reviews: 2,
        },
        Company {
            id: 5,
            name: "Lotus Capital Gestion".to_string(),
            description: "Quantitative Trading & Fintech".to_string(),
            industry: "Finance".to_string(),
            website: "https://www.lotuscapital.ma".to_string(),
            logo: "media/image6.png".to_string(),
            location: "Casablanca, Morocco".to_string(),
            size: "small".to_string(),
            founded: 2015,
            average_rating: 4.6,
            total_reviews: 2,
        },
    ]
}

pub fn default_internships() -> Vec<Internship> {
    let now = Utc::now();
    vec![
        Internship {
            id: 1,
            company_id: 1,
            title: "Data Science Internship".to_string(),
            description: "Work on real-world data projects with ONCF".to_string(),
            location: "Rabat".to_string(),
            remote_type: "hybrid".to_string(),
            duration_months: 3,
            salary_min: 3000,
            salary_max: 5000,
            required_skills: "Python, Machine Learning, SQL".to_string(),
            posted_date: now.to_rfc3339(),
            deadline: (now + Duration::days(30)).to_rfc3339(),
            status: "open".to_string(),
            applications_count: 12,
            views_count: 245,
        },
        Internship {
            id: 2,
            company_id: 2,
            title: "Web Development Internship".to_string(),
            description: "Build web applications for Inwi".to_string(),
            location: "Rabat".to_string(),
            remote_type: "on-site".to_string(),
            duration_months: 2,
            salary_min: 2500,
            salary_max: 4000,
            required_skills: "JavaScript, React, Node.js".to_string(),
            posted_date: now.to_rfc3339(),
            deadline: (now + Duration::days(20)).to_rfc3339(),
            status: "open".to_string(),
            applications_count: 8,
            views_count: 180,
        },
        Internship {
            id: 3,
            company_id: 3,
            title: "Cloud Engineering Internship".to_string(),
            description: "Work with Oracle Cloud infrastructure".to_string(),
            location: "Casablanca".to_string(),
            remote_type: "remote".to_string(),
            duration_months: 4,
            salary_min: 4000,
            salary_max: 6000,
            required_skills: "Cloud Computing, AWS/Azure, DevOps".to_string(),
            posted_date: now.to_rfc3339(),
            deadline: (now + Duration::days(35)).to_rfc3339(),
            status: "open".to_string(),
            applications_count: 15,
            views_count: 320,
        },
    ]
}
