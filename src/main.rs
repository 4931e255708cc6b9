mod error;
mod models;
mod seed;
mod store;

use anyhow::Result;
use clap::{Parser, Subcommand};
use models::ProfileUpdate;
use store::Store;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "esibridge")]
#[command(about = "EsiCareerBridge - browse internships, review companies, track applications")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize the local store with the default dataset
    Init,

    /// Register a new account
    Register {
        /// Email address (must be unique)
        #[arg(short, long)]
        email: String,

        /// Password
        #[arg(short, long)]
        password: String,

        /// Full name
        #[arg(short, long)]
        name: String,

        /// Account type (student, company, admin)
        #[arg(short = 't', long, default_value = "student")]
        user_type: String,
    },

    /// Log in and start a session
    Login {
        /// Email address
        email: String,

        /// Password
        password: String,
    },

    /// Clear the current session
    Logout,

    /// Show the current session user
    Whoami,

    /// Update the logged-in user's profile
    Profile {
        /// New full name
        #[arg(long)]
        name: Option<String>,

        /// New email
        #[arg(long)]
        email: Option<String>,

        /// New password
        #[arg(long)]
        password: Option<String>,

        /// Short bio
        #[arg(long)]
        bio: Option<String>,

        /// Phone number
        #[arg(long)]
        phone: Option<String>,

        /// Profile photo path or URL
        #[arg(long)]
        photo: Option<String>,
    },

    /// Browse companies
    Company {
        #[command(subcommand)]
        command: CompanyCommands,
    },

    /// Browse internships
    Internship {
        #[command(subcommand)]
        command: InternshipCommands,
    },

    /// Company reviews
    Review {
        #[command(subcommand)]
        command: ReviewCommands,
    },

    /// Apply for an internship
    Apply {
        /// Internship ID
        internship_id: i64,
    },

    /// List your applications
    Applications,

    /// Save an internship for later
    Save {
        /// Internship ID
        internship_id: i64,
    },

    /// Remove an internship from your saved list
    Unsave {
        /// Internship ID
        internship_id: i64,
    },

    /// List your saved internships
    Saved,

    /// Send a message to the platform team
    Contact {
        /// Your name
        #[arg(long)]
        name: String,

        /// Your email
        #[arg(long)]
        email: String,

        /// Subject line
        #[arg(long)]
        subject: String,

        /// Message body
        #[arg(long)]
        message: String,
    },
}

#[derive(Subcommand)]
enum CompanyCommands {
    /// List all companies
    List,

    /// Show company details, internships and recent reviews
    Show {
        /// Company ID
        id: i64,
    },
}

#[derive(Subcommand)]
enum InternshipCommands {
    /// List internships
    List {
        /// Filter by company ID
        #[arg(short, long)]
        company: Option<i64>,

        /// Filter by status (open, closed)
        #[arg(short, long)]
        status: Option<String>,
    },

    /// Show internship details
    Show {
        /// Internship ID
        id: i64,
    },
}

#[derive(Subcommand)]
enum ReviewCommands {
    /// Add a review for a company
    Add {
        /// Company ID
        company_id: i64,

        /// Rating from 1 to 5
        #[arg(value_parser = clap::value_parser!(i64).range(1..=5))]
        rating: i64,

        /// Review title
        #[arg(long)]
        title: String,

        /// Review text
        #[arg(long)]
        comment: String,

        /// Hide your name on the review
        #[arg(long)]
        anonymous: bool,
    },

    /// List reviews for a company, most recent first
    List {
        /// Company ID
        company_id: i64,
    },

    /// Delete one of your reviews (admins can delete any)
    Delete {
        /// Review ID
        id: i64,
    },
}

fn init_logging() {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .compact()
        .try_init();
}

fn main() -> Result<()> {
    init_logging();
    let cli = Cli::parse();
    let store = Store::open()?;
    // The original seeds on every page load; every command does the same.
    store.init()?;

    match cli.command {
        Commands::Init => {
            println!("Store initialized at {}", store.path().display());
        }

        Commands::Register {
            email,
            password,
            name,
            user_type,
        } => {
            let user = store.register_user(&email, &password, &name, &user_type)?;
            println!("Registered {} <{}> (ID: {})", user.full_name, user.email, user.id);
        }

        Commands::Login { email, password } => {
            let user = store.login_user(&email, &password)?;
            println!("Logged in as {} ({})", user.full_name, user.user_type);
        }

        Commands::Logout => {
            store.logout();
            println!("Logged out.");
        }

        Commands::Whoami => match store.current_user() {
            Some(user) => {
                println!("{} <{}>", user.full_name, user.email);
                println!("Type: {}", user.user_type);
                println!("Member since: {}", user.created_at);
                if !user.bio.is_empty() {
                    println!("Bio: {}", user.bio);
                }
                if !user.phone.is_empty() {
                    println!("Phone: {}", user.phone);
                }
            }
            None => println!("Not logged in."),
        },

        Commands::Profile {
            name,
            email,
            password,
            bio,
            phone,
            photo,
        } => {
            let session = store
                .current_user()
                .ok_or(error::StoreError::Unauthenticated)?;
            let updates = ProfileUpdate {
                full_name: name,
                email,
                password,
                bio,
                phone,
                profile_photo: photo,
            };
            let user = store.update_user_profile(session.id, &updates)?;
            println!("Profile updated for {} <{}>", user.full_name, user.email);
        }

        Commands::Company { command } => match command {
            CompanyCommands::List => {
                let companies = store.companies();
                if companies.is_empty() {
                    println!("No companies found.");
                } else {
                    println!(
                        "{:<4} {:<28} {:<20} {:<22} {:>6} {:>8}",
                        "ID", "NAME", "INDUSTRY", "LOCATION", "RATING", "REVIEWS"
                    );
                    println!("{}", "-".repeat(92));
                    for company in companies {
                        println!(
                            "{:<4} {:<28} {:<20} {:<22} {:>6.2} {:>8}",
                            company.id,
                            truncate(&company.name, 26),
                            truncate(&company.industry, 18),
                            truncate(&company.location, 20),
                            company.average_rating,
                            company.total_reviews
                        );
                    }
                }
            }

            CompanyCommands::Show { id } => match store.company_by_id(id) {
                Some(company) => {
                    println!("Company #{}: {}", company.id, company.name);
                    println!("{}", textwrap::fill(&company.description, 72));
                    println!("Industry: {}", company.industry);
                    println!("Location: {}", company.location);
                    println!("Size: {} (founded {})", company.size, company.founded);
                    println!("Website: {}", company.website);
                    println!(
                        "Rating: {:.2} ({} reviews)",
                        company.average_rating, company.total_reviews
                    );

                    let internships = store.internships_by_company(id);
                    if !internships.is_empty() {
                        println!("\nInternships ({}):", internships.len());
                        for internship in internships {
                            println!(
                                "  #{} - {} ({}, {} months)",
                                internship.id,
                                internship.title,
                                internship.status,
                                internship.duration_months
                            );
                        }
                    }

                    let reviews = store.reviews_for_company(id);
                    if !reviews.is_empty() {
                        println!("\nRecent reviews:");
                        for review in reviews.iter().take(3) {
                            println!(
                                "  {} {} - {} ({})",
                                stars(review.rating),
                                review.title,
                                review.user_name,
                                review.created_at
                            );
                        }
                    }
                }
                None => println!("Company #{} not found.", id),
            },
        },

        Commands::Internship { command } => match command {
            InternshipCommands::List { company, status } => {
                let mut internships = match company {
                    Some(company_id) => store.internships_by_company(company_id),
                    None => store.internships(),
                };
                if let Some(s) = status {
                    internships.retain(|i| i.status == s);
                }
                if internships.is_empty() {
                    println!("No internships found.");
                } else {
                    println!(
                        "{:<4} {:<8} {:<32} {:<20} {:>8} {:>12} {:>6}",
                        "ID", "STATUS", "TITLE", "COMPANY", "MONTHS", "SALARY", "APPS"
                    );
                    println!("{}", "-".repeat(96));
                    for internship in internships {
                        let company_name = store
                            .company_by_id(internship.company_id)
                            .map(|c| c.name)
                            .unwrap_or_default();
                        println!(
                            "{:<4} {:<8} {:<32} {:<20} {:>8} {:>12} {:>6}",
                            internship.id,
                            internship.status,
                            truncate(&internship.title, 30),
                            truncate(&company_name, 18),
                            internship.duration_months,
                            format!("{}-{}", internship.salary_min, internship.salary_max),
                            internship.applications_count
                        );
                    }
                }
            }

            InternshipCommands::Show { id } => match store.internship_by_id(id) {
                Some(internship) => {
                    println!("Internship #{}: {}", internship.id, internship.title);
                    if let Some(company) = store.company_by_id(internship.company_id) {
                        println!("Company: {}", company.name);
                    }
                    println!("{}", textwrap::fill(&internship.description, 72));
                    println!(
                        "Location: {} ({})",
                        internship.location, internship.remote_type
                    );
                    println!("Duration: {} months", internship.duration_months);
                    println!(
                        "Salary: {} - {} MAD",
                        internship.salary_min, internship.salary_max
                    );
                    println!("Skills: {}", internship.required_skills);
                    println!("Status: {}", internship.status);
                    println!("Deadline: {}", internship.deadline);
                    println!(
                        "{} applications, {} views",
                        internship.applications_count, internship.views_count
                    );
                }
                None => println!("Internship #{} not found.", id),
            },
        },

        Commands::Review { command } => match command {
            ReviewCommands::Add {
                company_id,
                rating,
                title,
                comment,
                anonymous,
            } => {
                let session = store.current_user();
                let review = store.add_review(
                    session.as_ref(),
                    company_id,
                    rating,
                    &title,
                    &comment,
                    anonymous,
                )?;
                println!("Review #{} added as {}.", review.id, review.user_name);
            }

            ReviewCommands::List { company_id } => {
                let reviews = store.reviews_for_company(company_id);
                if reviews.is_empty() {
                    println!("No reviews for company #{}.", company_id);
                } else {
                    for review in reviews {
                        println!(
                            "#{} {} {} - {} ({})",
                            review.id,
                            stars(review.rating),
                            review.title,
                            review.user_name,
                            review.created_at
                        );
                        if !review.comment.is_empty() {
                            println!("{}", textwrap::indent(&textwrap::fill(&review.comment, 68), "    "));
                        }
                    }
                }
            }

            ReviewCommands::Delete { id } => {
                let session = store.current_user();
                store.delete_review(session.as_ref(), id)?;
                println!("Review #{} deleted.", id);
            }
        },

        Commands::Apply { internship_id } => {
            let session = store.current_user();
            let application = store.apply_for_internship(session.as_ref(), internship_id)?;
            println!(
                "Application #{} submitted for internship #{}.",
                application.id, application.internship_id
            );
        }

        Commands::Applications => {
            let session = store
                .current_user()
                .ok_or(error::StoreError::Unauthenticated)?;
            let applications = store.user_applications(session.id);
            if applications.is_empty() {
                println!("No applications yet.");
            } else {
                println!(
                    "{:<4} {:<32} {:<12} {:<26}",
                    "ID", "INTERNSHIP", "STATUS", "APPLIED"
                );
                println!("{}", "-".repeat(76));
                for application in applications {
                    let title = store
                        .internship_by_id(application.internship_id)
                        .map(|i| i.title)
                        .unwrap_or_else(|| format!("#{}", application.internship_id));
                    println!(
                        "{:<4} {:<32} {:<12} {:<26}",
                        application.id,
                        truncate(&title, 30),
                        application.status,
                        truncate(&application.applied_at, 24)
                    );
                }
            }
        }

        Commands::Save { internship_id } => {
            let session = store.current_user();
            store.save_internship(session.as_ref(), internship_id)?;
            println!("Internship #{} saved.", internship_id);
        }

        Commands::Unsave { internship_id } => {
            let session = store.current_user();
            store.unsave_internship(session.as_ref(), internship_id)?;
            println!("Internship #{} removed from saved list.", internship_id);
        }

        Commands::Saved => {
            let session = store
                .current_user()
                .ok_or(error::StoreError::Unauthenticated)?;
            let saved = store.saved_internships(session.id);
            if saved.is_empty() {
                println!("No saved internships.");
            } else {
                for entry in saved {
                    match store.internship_by_id(entry.internship_id) {
                        Some(internship) => println!(
                            "#{} - {} ({} months)",
                            internship.id, internship.title, internship.duration_months
                        ),
                        None => println!("#{} - (no longer listed)", entry.internship_id),
                    }
                }
            }
        }

        Commands::Contact {
            name,
            email,
            subject,
            message,
        } => {
            store.submit_contact(&name, &email, &subject, &message)?;
            println!("Thank you! We will contact you soon.");
        }
    }

    Ok(())
}

fn stars(rating: i64) -> String {
    let filled = rating.clamp(0, 5) as usize;
    format!("[{}{}]", "*".repeat(filled), " ".repeat(5 - filled))
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let cut: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", cut)
    }
}
