//! Customer app endpoints (`/app/*`).
//!
//! These are what the member-facing mobile app calls. None of them take the
//! cashier token, and a 401 here never touches the cashier session.

use puntos_core::validation::{validate_email, validate_password};
use puntos_core::{Customer, ValidationError};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::api::LoyaltyClient;
use crate::error::{ClientError, ClientResult};

#[derive(Debug, Serialize)]
struct Credentials<'a> {
    correo: &'a str,
    password: &'a str,
}

#[derive(Debug, Serialize)]
struct EmailOnly<'a> {
    correo: &'a str,
}

#[derive(Debug, Serialize)]
struct IdentifyRequest<'a> {
    correo: &'a str,
    nombre: Option<&'a str>,
    telefono: Option<&'a str>,
}

#[derive(Debug, Serialize)]
struct RegisterRequest<'a> {
    nombre: &'a str,
    correo: &'a str,
    telefono: Option<&'a str>,
    password: &'a str,
}

#[derive(Debug, Deserialize)]
struct ExistsResponse {
    #[serde(default)]
    exists: bool,
}

#[derive(Debug, Deserialize)]
struct OkResponse {
    #[serde(default)]
    ok: bool,
}

/// Fields of a new member registration.
#[derive(Debug, Clone, Default)]
pub struct Registration {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub password: String,
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

impl LoyaltyClient {
    async fn post_public<B: Serialize, T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        debug!(path, "POST (public)");
        let request = self.http().post(self.url(path)).json(body);
        self.execute(request, false).await
    }

    /// `POST /app/login`: member sign-in with email and password.
    pub async fn customer_login(&self, email: &str, password: &str) -> ClientResult<Customer> {
        let correo = validate_email(email)?;
        if password.is_empty() {
            return Err(ValidationError::Required {
                field: "password".into(),
            }
            .into());
        }

        let customer: Customer = self
            .post_public(
                "/app/login",
                &Credentials {
                    correo: &correo,
                    password,
                },
            )
            .await?;
        info!(id = customer.id, "Customer signed in");
        Ok(customer)
    }

    /// `POST /app/register`: creates a member account.
    pub async fn register_customer(&self, registration: &Registration) -> ClientResult<Customer> {
        let nombre = registration.name.trim();
        if nombre.is_empty() {
            return Err(ValidationError::Required {
                field: "name".into(),
            }
            .into());
        }
        let correo = validate_email(&registration.email)?;
        validate_password(&registration.password)?;

        let customer: Customer = self
            .post_public(
                "/app/register",
                &RegisterRequest {
                    nombre,
                    correo: &correo,
                    telefono: non_blank(registration.phone.as_deref()),
                    password: &registration.password,
                },
            )
            .await?;
        info!(id = customer.id, "Customer registered");
        Ok(customer)
    }

    /// `POST /app/check-email`: whether an account exists for the address.
    ///
    /// The backend answers 404 for unknown addresses; that is `Ok(false)`.
    pub async fn check_email(&self, email: &str) -> ClientResult<bool> {
        let correo = validate_email(email)?;
        match self
            .post_public::<_, ExistsResponse>("/app/check-email", &EmailOnly { correo: &correo })
            .await
        {
            Ok(response) => Ok(response.exists),
            Err(ClientError::NotFound(_)) => Ok(false),
            Err(e) => Err(e),
        }
    }

    /// `POST /app/set-password`: sets or resets a member's password.
    pub async fn set_password(&self, email: &str, password: &str) -> ClientResult<()> {
        let correo = validate_email(email)?;
        validate_password(password)?;

        let response: OkResponse = self
            .post_public(
                "/app/set-password",
                &Credentials {
                    correo: &correo,
                    password,
                },
            )
            .await?;

        if !response.ok {
            return Err(ClientError::Decode(
                "set-password did not confirm the change".into(),
            ));
        }
        info!("Customer password set");
        Ok(())
    }

    /// `POST /app/identify`: finds the member by email, creating it if new.
    pub async fn identify(
        &self,
        email: &str,
        name: Option<&str>,
        phone: Option<&str>,
    ) -> ClientResult<Customer> {
        let correo = validate_email(email)?;
        self.post_public(
            "/app/identify",
            &IdentifyRequest {
                correo: &correo,
                nombre: non_blank(name),
                telefono: non_blank(phone),
            },
        )
        .await
    }
}
