//! Fake employee generation for development databases.

use std::time::Instant;

use anyhow::Context;
use fake::Fake;
use fake::faker::name::en::{FirstName, LastName};
use officehub_auth::Role;
use officehub_core::password::hash_password_with_cost;
use officehub_models::ObjectId;
use rayon::prelude::*;
use sqlx::{PgPool, Postgres, Transaction};

/// Seeded accounts share this domain so they are easy to spot.
pub const SEED_EMAIL_DOMAIN: &str = "example.com";

const SEED_HASH_COST: u32 = 4;

const DEPARTMENTS: &[&str] = &["Engineering", "Design", "Operations", "Finance", "People"];
const DESIGNATIONS: &[&str] = &["Associate", "Engineer", "Senior Engineer", "Analyst", "Specialist"];

#[derive(Debug, Clone)]
pub struct EmployeeSeed {
    pub name: String,
    pub email: String,
    pub role: Role,
    pub department: String,
    pub designation: String,
}

/// `managers` Managers followed by `count` Employees. Emails embed the
/// index so one batch never collides with itself.
pub fn generate_employees(count: usize, managers: usize) -> Vec<EmployeeSeed> {
    (0..managers + count)
        .into_par_iter()
        .map(|idx| {
            let first_name: String = FirstName().fake();
            let last_name: String = LastName().fake();
            let (role, designation) = if idx < managers {
                (Role::Manager, "Team Lead")
            } else {
                (Role::Employee, DESIGNATIONS[idx % DESIGNATIONS.len()])
            };

            EmployeeSeed {
                email: format!(
                    "{}.{}+{}{idx}@{SEED_EMAIL_DOMAIN}",
                    first_name.to_lowercase(),
                    last_name.to_lowercase(),
                    role.as_str().to_lowercase(),
                )
                .replace(|c: char| c.is_whitespace() || c == '\'', ""),
                name: format!("{first_name} {last_name}"),
                role,
                department: DEPARTMENTS[idx % DEPARTMENTS.len()].to_string(),
                designation: designation.to_string(),
            }
        })
        .collect()
}

/// Inserts all seeds in one transaction. Rows whose email already exists
/// are skipped. Returns the number inserted.
pub async fn insert_employees(
    db: &PgPool,
    seeds: &[EmployeeSeed],
    password_hash: &str,
) -> Result<u64, sqlx::Error> {
    // 7 params per row
    const BATCH_SIZE: usize = 1000;

    let mut tx = db.begin().await?;
    let mut inserted = 0;
    for chunk in seeds.chunks(BATCH_SIZE) {
        inserted += insert_chunk(&mut tx, chunk, password_hash).await?;
    }
    tx.commit().await?;

    Ok(inserted)
}

async fn insert_chunk(
    tx: &mut Transaction<'_, Postgres>,
    seeds: &[EmployeeSeed],
    password_hash: &str,
) -> Result<u64, sqlx::Error> {
    if seeds.is_empty() {
        return Ok(0);
    }

    let mut query = String::from(
        "INSERT INTO users (id, name, email, password_hash, role, department, designation) VALUES ",
    );
    for i in 0..seeds.len() {
        if i > 0 {
            query.push_str(", ");
        }
        let p = i * 7;
        query.push_str(&format!(
            "(${}, ${}, ${}, ${}, ${}::user_role, ${}, ${})",
            p + 1,
            p + 2,
            p + 3,
            p + 4,
            p + 5,
            p + 6,
            p + 7
        ));
    }
    query.push_str(" ON CONFLICT DO NOTHING");

    let mut q = sqlx::query(&query);
    for seed in seeds {
        q = q
            .bind(ObjectId::new())
            .bind(&seed.name)
            .bind(&seed.email)
            .bind(password_hash)
            .bind(seed.role.as_str())
            .bind(&seed.department)
            .bind(&seed.designation);
    }

    Ok(q.execute(&mut **tx).await?.rows_affected())
}

pub async fn seed_employees(
    db: &PgPool,
    count: usize,
    managers: usize,
    password: &str,
) -> anyhow::Result<u64> {
    let start_time = Instant::now();
    println!("👥 Seeding {count} employees and {managers} managers...");

    let password_hash = hash_password_with_cost(password, SEED_HASH_COST)
        .map_err(|e| e.error)
        .context("Failed to hash seed password")?;
    let seeds = generate_employees(count, managers);
    let inserted = insert_employees(db, &seeds, &password_hash)
        .await
        .context("Failed to insert seeded employees")?;

    println!("   ✓ Inserted {inserted} users in {:?}", start_time.elapsed());
    Ok(inserted)
}

/// Deletes every account on [`SEED_EMAIL_DOMAIN`] except Admins.
pub async fn clear_seeded(db: &PgPool) -> anyhow::Result<u64> {
    let deleted = sqlx::query("DELETE FROM users WHERE email LIKE $1 AND role <> 'Admin'")
        .bind(format!("%@{SEED_EMAIL_DOMAIN}"))
        .execute(db)
        .await
        .context("Failed to clear seeded users")?
        .rows_affected();

    println!("🗑️  Deleted {deleted} seeded users");
    Ok(deleted)
}
