use anyhow::anyhow;
use officehub_auth::{Role, issue_token};
use officehub_config::JwtConfig;
use officehub_core::{AppError, hash_password, verify_password};
use officehub_db::IdentityStore;
use officehub_models::{
    ChangePasswordRequest, Identity, LoginRequest, LoginResponse, NewIdentity, ObjectId,
    ProfileChanges, PublicIdentity, RegisterRequest, UpdateProfileRequest,
};
use tracing::instrument;

pub const INVALID_CREDENTIALS_MESSAGE: &str = "Invalid email or password";

pub struct AuthService;

impl AuthService {
    /// Signs a session token for `identity`.
    pub fn session(identity: Identity, jwt_config: &JwtConfig) -> Result<LoginResponse, AppError> {
        let issued = issue_token(identity.id.as_str(), identity.role, jwt_config)?;
        Ok(LoginResponse {
            token: issued.token,
            expires_at: issued.expires_at,
            user: identity.into(),
        })
    }

    /// Self-registration always yields an `Employee`.
    #[instrument(skip_all, fields(email = %dto.email))]
    pub async fn register(
        identities: &dyn IdentityStore,
        jwt_config: &JwtConfig,
        dto: RegisterRequest,
    ) -> Result<LoginResponse, AppError> {
        let password_hash = hash_password(&dto.password)?;

        let identity = identities
            .create(NewIdentity {
                name: dto.name,
                email: dto.email,
                password_hash,
                role: Role::Employee,
                department: dto.department,
                designation: dto.designation,
                phone: dto.phone,
            })
            .await?;

        tracing::info!(user_id = %identity.id, "Identity registered");
        Self::session(identity, jwt_config)
    }

    #[instrument(skip_all, fields(email = %dto.email))]
    pub async fn login(
        identities: &dyn IdentityStore,
        jwt_config: &JwtConfig,
        dto: LoginRequest,
    ) -> Result<LoginResponse, AppError> {
        let invalid = || AppError::unauthorized(INVALID_CREDENTIALS_MESSAGE);

        let identity = identities.find_by_email(&dto.email).await?.ok_or_else(invalid)?;

        if !verify_password(&dto.password, &identity.password_hash)? {
            tracing::debug!(user_id = %identity.id, "Login rejected: wrong password");
            return Err(invalid());
        }
        if !identity.is_active {
            tracing::debug!(user_id = %identity.id, "Login rejected: identity deactivated");
            return Err(invalid());
        }

        Self::session(identity, jwt_config)
    }

    #[instrument(skip(identities, dto))]
    pub async fn update_profile(
        identities: &dyn IdentityStore,
        user_id: &ObjectId,
        dto: UpdateProfileRequest,
    ) -> Result<PublicIdentity, AppError> {
        let changes = ProfileChanges {
            name: dto.name,
            department: dto.department,
            designation: dto.designation,
            phone: dto.phone,
        };

        identities
            .update_profile(user_id, changes)
            .await?
            .map(PublicIdentity::from)
            .ok_or_else(|| AppError::not_found(anyhow!("User not found")))
    }

    #[instrument(skip(identities, dto))]
    pub async fn change_password(
        identities: &dyn IdentityStore,
        user_id: &ObjectId,
        dto: ChangePasswordRequest,
    ) -> Result<(), AppError> {
        let identity = identities
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::not_found(anyhow!("User not found")))?;

        if !verify_password(&dto.current_password, &identity.password_hash)? {
            return Err(AppError::field(
                "currentPassword",
                "Current password is incorrect",
            ));
        }

        let password_hash = hash_password(&dto.new_password)?;
        identities.update_password(user_id, &password_hash).await?;

        tracing::info!(user_id = %user_id, "Password changed");
        Ok(())
    }
}
