use actix_web::{get, patch, post, web, HttpResponse, Responder};
use log::{error, info};
use serde_json::json;
use sqlx::PgPool;
use validator::Validate;

use crate::models::bet_model::BetMappingTable;
use crate::types::bet_types::{CreateBetMappingInput, PublicBetsQuery, UpdateVisibilityInput};
use crate::utils::random_id::generate_random_id;
use crate::utils::validation::{is_valid_random_id, is_valid_wallet_address};

const MAX_ID_ATTEMPTS: usize = 5;

async fn fetch_mapping_by_numeric(
    pool: &PgPool,
    numeric_id: i64,
) -> Result<Option<BetMappingTable>, sqlx::Error> {
    sqlx::query_as::<_, BetMappingTable>(
        r#"
        SELECT random_id, numeric_id, creator_address, bet_name, is_public, created_at
        FROM bet_mappings
        WHERE numeric_id = $1
        "#,
    )
    .bind(numeric_id)
    .fetch_optional(pool)
    .await
}

fn is_unique_violation(error: &sqlx::Error) -> bool {
    matches!(error, sqlx::Error::Database(db_err) if db_err.is_unique_violation())
}

#[post("/api/bets")]
pub async fn create_bet_mapping(
    db_pool: web::Data<PgPool>,
    req: web::Json<CreateBetMappingInput>,
) -> impl Responder {
    if let Err(e) = req.validate() {
        return HttpResponse::BadRequest().json(json!({
            "status": "error",
            "message": e.to_string()
        }));
    }
    if !is_valid_wallet_address(&req.creator_address) {
        return HttpResponse::BadRequest().json(json!({
            "status": "error",
            "message": "Invalid creator address"
        }));
    }

    let creator_address = req.creator_address.to_lowercase();
    let is_public = req.is_public.unwrap_or(false);

    let existing = match fetch_mapping_by_numeric(db_pool.get_ref(), req.numeric_id).await {
        Ok(existing) => existing,
        Err(e) => {
            error!("Failed to check existing mapping: {}", e);
            return HttpResponse::InternalServerError().json(json!({
                "status": "error",
                "message": "Failed to create bet mapping"
            }));
        }
    };

    if let Some(mapping) = existing {
        return HttpResponse::Ok().json(json!({
            "status": "success",
            "message": "Bet is already mapped",
            "created": false,
            "mapping": mapping
        }));
    }

    for _ in 0..MAX_ID_ATTEMPTS {
        let random_id = generate_random_id();

        let inserted = match sqlx::query_as::<_, BetMappingTable>(
            r#"
            INSERT INTO bet_mappings (random_id, numeric_id, creator_address, bet_name, is_public)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (random_id) DO NOTHING
            RETURNING random_id, numeric_id, creator_address, bet_name, is_public, created_at
            "#,
        )
        .bind(&random_id)
        .bind(req.numeric_id)
        .bind(&creator_address)
        .bind(req.bet_name.as_deref())
        .bind(is_public)
        .fetch_optional(db_pool.get_ref())
        .await
        {
            Ok(row) => row,
            Err(e) => {
                // A concurrent create for the same numeric_id can win
                // between the pre-check and this insert; the loser lands
                // here with a unique violation on numeric_id.
                if is_unique_violation(&e) {
                    match fetch_mapping_by_numeric(db_pool.get_ref(), req.numeric_id).await {
                        Ok(Some(mapping)) => {
                            return HttpResponse::Ok().json(json!({
                                "status": "success",
                                "message": "Bet is already mapped",
                                "created": false,
                                "mapping": mapping
                            }));
                        }
                        Ok(None) => {}
                        Err(e) => {
                            error!("Failed to re-check mapping after conflict: {}", e);
                        }
                    }
                }
                error!("Failed to insert bet mapping: {}", e);
                return HttpResponse::InternalServerError().json(json!({
                    "status": "error",
                    "message": "Failed to create bet mapping"
                }));
            }
        };

        if let Some(mapping) = inserted {
            info!(
                "Created bet mapping: random_id={}, numeric_id={}",
                mapping.random_id, mapping.numeric_id
            );
            return HttpResponse::Created().json(json!({
                "status": "success",
                "message": "Bet mapping created",
                "created": true,
                "mapping": mapping
            }));
        }
        // random_id collided, roll a new one
    }

    error!(
        "Exhausted random id attempts for numeric_id={}",
        req.numeric_id
    );
    HttpResponse::InternalServerError().json(json!({
        "status": "error",
        "message": "Failed to create bet mapping"
    }))
}

#[get("/api/bets/public")]
pub async fn list_public_bets(
    db_pool: web::Data<PgPool>,
    query: web::Query<PublicBetsQuery>,
) -> impl Responder {
    let limit = query.limit.unwrap_or(20).clamp(1, 100);
    let offset = query.offset.unwrap_or(0).max(0);

    match sqlx::query_as::<_, BetMappingTable>(
        r#"
        SELECT random_id, numeric_id, creator_address, bet_name, is_public, created_at
        FROM bet_mappings
        WHERE is_public = TRUE
        ORDER BY created_at DESC, random_id ASC
        LIMIT $1 OFFSET $2
        "#,
    )
    .bind(limit)
    .bind(offset)
    .fetch_all(db_pool.get_ref())
    .await
    {
        Ok(bets) => HttpResponse::Ok().json(json!({
            "status": "success",
            "message": "Public bets fetched successfully",
            "bets": bets,
            "count": bets.len(),
            "limit": limit,
            "offset": offset
        })),
        Err(e) => {
            error!("Failed to fetch public bets: {}", e);
            HttpResponse::InternalServerError().json(json!({
                "status": "error",
                "message": "Failed to fetch public bets"
            }))
        }
    }
}

#[get("/api/bets/lookup-by-numeric/{numeric_id}")]
pub async fn lookup_by_numeric(
    db_pool: web::Data<PgPool>,
    path: web::Path<String>,
) -> impl Responder {
    let numeric_id = match path.into_inner().parse::<i64>() {
        Ok(id) if id >= 0 => id,
        _ => {
            return HttpResponse::BadRequest().json(json!({
                "status": "error",
                "message": "Invalid numeric bet id"
            }));
        }
    };

    match fetch_mapping_by_numeric(db_pool.get_ref(), numeric_id).await {
        Ok(Some(mapping)) => HttpResponse::Ok().json(json!({
            "status": "success",
            "mapping": mapping
        })),
        Ok(None) => HttpResponse::Ok().json(json!({
            "status": "success",
            "mapping": null
        })),
        Err(e) => {
            error!("Failed to fetch bet mapping: {}", e);
            HttpResponse::InternalServerError().json(json!({
                "status": "error",
                "message": "Failed to fetch bet mapping"
            }))
        }
    }
}

#[get("/api/bets/{random_id}")]
pub async fn get_bet_mapping(
    db_pool: web::Data<PgPool>,
    path: web::Path<String>,
) -> impl Responder {
    let random_id = path.into_inner();
    if !is_valid_random_id(&random_id) {
        return HttpResponse::BadRequest().json(json!({
            "status": "error",
            "message": "Invalid bet id format"
        }));
    }

    match sqlx::query_as::<_, BetMappingTable>(
        r#"
        SELECT random_id, numeric_id, creator_address, bet_name, is_public, created_at
        FROM bet_mappings
        WHERE random_id = $1
        "#,
    )
    .bind(&random_id)
    .fetch_optional(db_pool.get_ref())
    .await
    {
        Ok(Some(mapping)) => HttpResponse::Ok().json(json!({
            "status": "success",
            "mapping": mapping
        })),
        Ok(None) => HttpResponse::Ok().json(json!({
            "status": "success",
            "mapping": null
        })),
        Err(e) => {
            error!("Failed to fetch bet mapping: {}", e);
            HttpResponse::InternalServerError().json(json!({
                "status": "error",
                "message": "Failed to fetch bet mapping"
            }))
        }
    }
}

#[patch("/api/bets/{random_id}/visibility")]
pub async fn update_visibility(
    db_pool: web::Data<PgPool>,
    path: web::Path<String>,
    req: web::Json<UpdateVisibilityInput>,
) -> impl Responder {
    let random_id = path.into_inner();
    if !is_valid_random_id(&random_id) {
        return HttpResponse::BadRequest().json(json!({
            "status": "error",
            "message": "Invalid bet id format"
        }));
    }
    if !is_valid_wallet_address(&req.creator_address) {
        return HttpResponse::BadRequest().json(json!({
            "status": "error",
            "message": "Invalid creator address"
        }));
    }

    let creator_address = req.creator_address.to_lowercase();

    match sqlx::query(
        r#"
        UPDATE bet_mappings
        SET is_public = $1
        WHERE random_id = $2 AND creator_address = $3
        "#,
    )
    .bind(req.is_public)
    .bind(&random_id)
    .bind(&creator_address)
    .execute(db_pool.get_ref())
    .await
    {
        Ok(result) if result.rows_affected() == 0 => HttpResponse::NotFound().json(json!({
            "status": "error",
            "message": "Bet not found for this creator"
        })),
        Ok(_) => {
            info!(
                "Updated bet visibility: random_id={}, is_public={}",
                random_id, req.is_public
            );
            HttpResponse::Ok().json(json!({
                "status": "success",
                "message": "Visibility updated",
                "random_id": random_id,
                "is_public": req.is_public
            }))
        }
        Err(e) => {
            error!("Failed to update bet visibility: {}", e);
            HttpResponse::InternalServerError().json(json!({
                "status": "error",
                "message": "Failed to update visibility"
            }))
        }
    }
}
