//! Integration tests for vault and vault-movie repositories.
//!
//! Exercises ownership scoping, the `(vault_id, tmdb_id)` uniqueness
//! constraint, cascade delete, and release-date round-tripping.

use chrono::NaiveDate;
use reelvault_core::genre::Genre;
use reelvault_db::models::rating::UpsertRating;
use reelvault_db::models::user::{UpsertUser, User};
use reelvault_db::models::vault::{CreateVault, UpdateVault};
use reelvault_db::models::vault_movie::CreateVaultMovie;
use reelvault_db::repositories::{MovieRepo, RatingRepo, UserRepo, VaultMovieRepo, VaultRepo};
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn create_user(pool: &PgPool, sub: &str) -> User {
    UserRepo::upsert_by_external_id(
        pool,
        &UpsertUser {
            external_auth_id: sub.to_string(),
            email: format!("{sub}@test.com"),
            name: None,
            initial_role: "user".to_string(),
        },
    )
    .await
    .unwrap()
}

fn new_vault(user_id: i64, name: &str) -> CreateVault {
    CreateVault {
        user_id,
        name: name.to_string(),
        description: None,
    }
}

fn new_vault_movie(vault_id: i64, tmdb_id: i64, title: &str) -> CreateVaultMovie {
    CreateVaultMovie {
        vault_id,
        tmdb_id,
        title: title.to_string(),
        director: None,
        release_date: None,
        poster_path: None,
        backdrop_path: None,
        overview: None,
        runtime: None,
        genres: Vec::new(),
        vote_average: None,
        imdb_id: None,
    }
}

// ---------------------------------------------------------------------------
// Ownership
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_find_owned_hides_other_users_vaults(pool: PgPool) {
    let alice = create_user(&pool, "alice").await;
    let bob = create_user(&pool, "bob").await;
    let vault = VaultRepo::create(&pool, &new_vault(alice.id, "Noir")).await.unwrap();

    assert!(VaultRepo::find_owned(&pool, vault.id, alice.id)
        .await
        .unwrap()
        .is_some());
    assert!(VaultRepo::find_owned(&pool, vault.id, bob.id)
        .await
        .unwrap()
        .is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_update_and_delete_are_owner_scoped(pool: PgPool) {
    let alice = create_user(&pool, "alice").await;
    let bob = create_user(&pool, "bob").await;
    let vault = VaultRepo::create(&pool, &new_vault(alice.id, "Noir")).await.unwrap();

    let update = UpdateVault {
        name: Some("Hijacked".into()),
        description: None,
    };
    assert!(VaultRepo::update_owned(&pool, vault.id, bob.id, &update)
        .await
        .unwrap()
        .is_none());
    assert!(!VaultRepo::delete_owned(&pool, vault.id, bob.id).await.unwrap());

    let renamed = VaultRepo::update_owned(&pool, vault.id, alice.id, &update)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(renamed.name, "Hijacked");
    assert!(VaultRepo::delete_owned(&pool, vault.id, alice.id).await.unwrap());
}

// ---------------------------------------------------------------------------
// Vault movies
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_duplicate_tmdb_id_in_same_vault_violates_constraint(pool: PgPool) {
    let alice = create_user(&pool, "alice").await;
    let vault = VaultRepo::create(&pool, &new_vault(alice.id, "Nolan")).await.unwrap();

    VaultMovieRepo::create(&pool, &new_vault_movie(vault.id, 27205, "Inception"))
        .await
        .unwrap();
    let err = VaultMovieRepo::create(&pool, &new_vault_movie(vault.id, 27205, "Inception"))
        .await
        .unwrap_err();

    match err {
        sqlx::Error::Database(db_err) => {
            assert_eq!(db_err.code().as_deref(), Some("23505"));
            assert_eq!(db_err.constraint(), Some("uq_vault_movies_vault_tmdb"));
        }
        other => panic!("expected unique violation, got {other:?}"),
    }
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_same_tmdb_id_allowed_in_different_vaults(pool: PgPool) {
    let alice = create_user(&pool, "alice").await;
    let a = VaultRepo::create(&pool, &new_vault(alice.id, "A")).await.unwrap();
    let b = VaultRepo::create(&pool, &new_vault(alice.id, "B")).await.unwrap();

    VaultMovieRepo::create(&pool, &new_vault_movie(a.id, 27205, "Inception"))
        .await
        .unwrap();
    VaultMovieRepo::create(&pool, &new_vault_movie(b.id, 27205, "Inception"))
        .await
        .unwrap();
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_release_date_and_genres_round_trip(pool: PgPool) {
    let alice = create_user(&pool, "alice").await;
    let vault = VaultRepo::create(&pool, &new_vault(alice.id, "Nolan")).await.unwrap();

    let mut input = new_vault_movie(vault.id, 27205, "Inception");
    input.release_date = NaiveDate::from_ymd_opt(2010, 7, 16);
    input.genres = vec![Genre {
        id: 878,
        name: "Science Fiction".into(),
    }];
    VaultMovieRepo::create(&pool, &input).await.unwrap();

    let stored = VaultMovieRepo::find_by_vault_and_tmdb(&pool, vault.id, 27205)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored.release_date, NaiveDate::from_ymd_opt(2010, 7, 16));
    assert_eq!(stored.genres.0[0].name, "Science Fiction");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_delete_vault_cascades_to_movies(pool: PgPool) {
    let alice = create_user(&pool, "alice").await;
    let vault = VaultRepo::create(&pool, &new_vault(alice.id, "Nolan")).await.unwrap();
    VaultMovieRepo::create(&pool, &new_vault_movie(vault.id, 27205, "Inception"))
        .await
        .unwrap();

    assert!(VaultRepo::delete_owned(&pool, vault.id, alice.id).await.unwrap());

    let remaining: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM vault_movies WHERE vault_id = $1")
        .bind(vault.id)
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(remaining.0, 0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_delete_movie_requires_vault_ownership(pool: PgPool) {
    let alice = create_user(&pool, "alice").await;
    let bob = create_user(&pool, "bob").await;
    let vault = VaultRepo::create(&pool, &new_vault(alice.id, "Nolan")).await.unwrap();
    let movie = VaultMovieRepo::create(&pool, &new_vault_movie(vault.id, 27205, "Inception"))
        .await
        .unwrap();

    assert!(!VaultMovieRepo::delete_owned(&pool, movie.id, vault.id, bob.id)
        .await
        .unwrap());
    assert!(VaultMovieRepo::delete_owned(&pool, movie.id, vault.id, alice.id)
        .await
        .unwrap());
}

// ---------------------------------------------------------------------------
// Summaries and collection status
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_summary_counts_movies_and_limits_previews(pool: PgPool) {
    let alice = create_user(&pool, "alice").await;
    let vault = VaultRepo::create(&pool, &new_vault(alice.id, "Big")).await.unwrap();

    for tmdb_id in 1..=6 {
        let mut input = new_vault_movie(vault.id, tmdb_id, "Movie");
        input.poster_path = Some(format!("/p{tmdb_id}.jpg"));
        VaultMovieRepo::create(&pool, &input).await.unwrap();
    }
    VaultMovieRepo::create(&pool, &new_vault_movie(vault.id, 7, "No poster"))
        .await
        .unwrap();

    let summaries = VaultRepo::list_for_user(&pool, alice.id).await.unwrap();
    assert_eq!(summaries.len(), 1);
    assert_eq!(summaries[0].movie_count, 7);
    assert_eq!(summaries[0].poster_previews.len(), 4);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_collection_status_reflects_callers_catalog(pool: PgPool) {
    let alice = create_user(&pool, "alice").await;
    let bob = create_user(&pool, "bob").await;
    let vault = VaultRepo::create(&pool, &new_vault(alice.id, "Mixed")).await.unwrap();
    VaultMovieRepo::create(&pool, &new_vault_movie(vault.id, 27205, "Inception"))
        .await
        .unwrap();
    VaultMovieRepo::create(&pool, &new_vault_movie(vault.id, 155, "The Dark Knight"))
        .await
        .unwrap();

    MovieRepo::create(
        &pool,
        &reelvault_db::models::movie::CreateMovie {
            tmdb_id: Some(155),
            title: "The Dark Knight".into(),
            created_by: Some(alice.id),
            ..Default::default()
        },
    )
    .await
    .unwrap();
    // Bob's catalog entry says nothing about Alice's collection.
    MovieRepo::create(
        &pool,
        &reelvault_db::models::movie::CreateMovie {
            tmdb_id: Some(27205),
            title: "Inception".into(),
            created_by: Some(bob.id),
            ..Default::default()
        },
    )
    .await
    .unwrap();

    let with_status = VaultMovieRepo::list_for_vault(&pool, vault.id, Some(alice.id))
        .await
        .unwrap();
    let status_of = |tmdb_id: i64| {
        with_status
            .iter()
            .find(|m| m.movie.tmdb_id == tmdb_id)
            .and_then(|m| m.in_collection)
    };
    assert_eq!(status_of(155), Some(true));
    assert_eq!(status_of(27205), Some(false));

    let without_status = VaultMovieRepo::list_for_vault(&pool, vault.id, None).await.unwrap();
    assert!(without_status.iter().all(|m| m.in_collection.is_none()));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_rated_catalog_movie_counts_as_collected(pool: PgPool) {
    let alice = create_user(&pool, "alice").await;
    let bob = create_user(&pool, "bob").await;
    let vault = VaultRepo::create(&pool, &new_vault(alice.id, "Nolan")).await.unwrap();
    VaultMovieRepo::create(&pool, &new_vault_movie(vault.id, 27205, "Inception"))
        .await
        .unwrap();
    let inception = MovieRepo::create(
        &pool,
        &reelvault_db::models::movie::CreateMovie {
            tmdb_id: Some(27205),
            title: "Inception".into(),
            created_by: Some(bob.id),
            ..Default::default()
        },
    )
    .await
    .unwrap();

    RatingRepo::upsert(
        &pool,
        &UpsertRating {
            user_id: alice.id,
            movie_id: inception.id,
            rating: Some(9.0),
            watched_at: None,
            notes: None,
        },
    )
    .await
    .unwrap();

    let for_alice = VaultMovieRepo::list_for_vault(&pool, vault.id, Some(alice.id))
        .await
        .unwrap();
    assert_eq!(for_alice[0].in_collection, Some(true));
}
