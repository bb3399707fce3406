use anyhow::anyhow;
use officehub_auth::Role;
use officehub_core::{AppError, Paginated, hash_password};
use officehub_db::IdentityStore;
use officehub_models::{
    CreateUserRequest, IdentityQuery, NewIdentity, ObjectId, PublicIdentity, UserFilterParams,
};
use tracing::instrument;

fn user_not_found() -> AppError {
    AppError::not_found(anyhow!("User not found"))
}

pub struct UserService;

impl UserService {
    #[instrument(skip(identities))]
    pub async fn list(
        identities: &dyn IdentityStore,
        params: UserFilterParams,
    ) -> Result<Paginated<PublicIdentity>, AppError> {
        let query = IdentityQuery {
            role: params.role,
            search: params.search,
            include_inactive: params.include_inactive.unwrap_or(false),
            limit: params.pagination.limit(),
            offset: params.pagination.offset(),
        };

        let (rows, total) = identities.list(&query).await?;
        let items = rows.into_iter().map(PublicIdentity::from).collect();
        Ok(Paginated::new(items, &params.pagination, total))
    }

    #[instrument(skip(identities))]
    pub async fn get(
        identities: &dyn IdentityStore,
        id: &ObjectId,
    ) -> Result<PublicIdentity, AppError> {
        identities
            .find_by_id(id)
            .await?
            .map(PublicIdentity::from)
            .ok_or_else(user_not_found)
    }

    #[instrument(skip_all, fields(email = %dto.email, role = %dto.role))]
    pub async fn create(
        identities: &dyn IdentityStore,
        dto: CreateUserRequest,
    ) -> Result<PublicIdentity, AppError> {
        let password_hash = hash_password(&dto.password)?;

        let identity = identities
            .create(NewIdentity {
                name: dto.name,
                email: dto.email,
                password_hash,
                role: dto.role,
                department: dto.department,
                designation: dto.designation,
                phone: dto.phone,
            })
            .await?;

        tracing::info!(user_id = %identity.id, "User created");
        Ok(identity.into())
    }

    #[instrument(skip(identities))]
    pub async fn update_role(
        identities: &dyn IdentityStore,
        actor_id: &ObjectId,
        id: &ObjectId,
        role: Role,
    ) -> Result<PublicIdentity, AppError> {
        if actor_id == id {
            return Err(AppError::forbidden("You cannot change your own role"));
        }

        let identity = identities.set_role(id, role).await?.ok_or_else(user_not_found)?;
        tracing::info!(user_id = %id, role = %role, "User role changed");
        Ok(identity.into())
    }

    #[instrument(skip(identities))]
    pub async fn update_status(
        identities: &dyn IdentityStore,
        actor_id: &ObjectId,
        id: &ObjectId,
        is_active: bool,
    ) -> Result<PublicIdentity, AppError> {
        if actor_id == id && !is_active {
            return Err(AppError::forbidden("You cannot deactivate your own account"));
        }

        let identity = identities
            .set_active(id, is_active)
            .await?
            .ok_or_else(user_not_found)?;
        tracing::info!(user_id = %id, is_active, "User status changed");
        Ok(identity.into())
    }
}
