use storage::{
    dto::pair::CreatePairRequest,
    error::Result,
    models::{BullPair, RegistrationStatus},
    repository::PairRepository,
    store::DocumentStore,
};
use uuid::Uuid;

/// List registrations, optionally scoped to one category, in registration
/// order
pub async fn list_pairs(
    store: &dyn DocumentStore,
    category_id: Option<Uuid>,
) -> Result<Vec<BullPair>> {
    let repo = PairRepository::new(store);
    match category_id {
        Some(id) => repo.list_by_category(id).await,
        None => repo.list().await,
    }
}

/// Get one registration by id
pub async fn get_pair(store: &dyn DocumentStore, id: Uuid) -> Result<BullPair> {
    PairRepository::new(store).find_by_id(id).await
}

/// Register a new pair; starts pending with the next registration number
pub async fn create_pair(store: &dyn DocumentStore, req: &CreatePairRequest) -> Result<BullPair> {
    PairRepository::new(store).create(req).await
}

/// Approve or reject a registration
pub async fn set_pair_status(
    store: &dyn DocumentStore,
    id: Uuid,
    status: RegistrationStatus,
) -> Result<BullPair> {
    let pair = PairRepository::new(store).set_status(id, status).await?;
    tracing::info!(pair_id = %id, status = status.as_str(), "registration status changed");
    Ok(pair)
}
