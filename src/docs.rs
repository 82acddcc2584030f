use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use studyport_models::{Account, SubscriptionInfo, SubscriptionTier, UserRole};

use crate::modules::auth::controller::ErrorResponse;
use crate::modules::auth::model::{LoginRequest, LoginResponse, RegisterRequestDto};
use crate::modules::materials::model::Material;
use crate::modules::users::controller::ProfileResponse;
use crate::modules::users::model::UpdateSubscriptionDto;

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::modules::auth::controller::register_user,
        crate::modules::auth::controller::login_user,
        crate::modules::users::controller::get_accounts,
        crate::modules::users::controller::update_subscription,
        crate::modules::users::controller::get_profile,
        crate::modules::materials::controller::list_materials,
        crate::modules::materials::controller::list_premium_materials,
        crate::modules::materials::controller::upload_material,
        crate::modules::materials::controller::delete_material,
    ),
    components(
        schemas(
            Account,
            UserRole,
            SubscriptionTier,
            SubscriptionInfo,
            LoginRequest,
            LoginResponse,
            RegisterRequestDto,
            UpdateSubscriptionDto,
            ProfileResponse,
            Material,
            ErrorResponse,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Authentication", description = "Registration and login"),
        (name = "Users", description = "Accounts, profiles, and subscription management"),
        (name = "Materials", description = "Subscription-gated study materials")
    ),
    info(
        title = "Studyport API",
        version = "0.1.0",
        description = "Student learning portal backend with JWT authentication, role-based access control, and tiered subscription gating."
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}
