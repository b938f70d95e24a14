// src/models/auth.rs

use serde::{Deserialize, Deserializer, Serialize};
use sqlx::FromRow;
use validator::{Validate, ValidationError};

// Nomes dos cargos semeados pela migração
pub const ROLE_ADMIN: &str = "Admin";
pub const ROLE_USER: &str = "User";

// Representa um usuário vindo do banco de dados
#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: i32,
    pub user_name: String,

    #[serde(skip_serializing)] // IMPORTANTE para segurança
    pub password_hash: String,
}

// Usuário + cargos, como sai para o cliente
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserDto {
    pub id: i32,
    pub user_name: String,
    pub roles: Vec<String>,
}

fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("required"));
    }
    Ok(())
}

// `null` conta como ausente: cai no valor padrão e depois na validação.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

// Dados para criação de um usuário (POST /api/users)
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserPayload {
    #[validate(custom(function = "not_blank", message = "Username is required."))]
    #[serde(default, deserialize_with = "null_as_default")]
    pub user_name: String,

    #[validate(custom(function = "not_blank", message = "Password is required."))]
    #[serde(default, deserialize_with = "null_as_default")]
    pub password: String,

    #[validate(length(min = 1, message = "At least one role is required."))]
    #[serde(default, deserialize_with = "null_as_default")]
    pub roles: Vec<String>,
}

// Dados para login
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct LoginUserPayload {
    #[validate(custom(function = "not_blank", message = "Username is required."))]
    #[serde(default)]
    pub user_name: String,

    #[validate(custom(function = "not_blank", message = "Password is required."))]
    #[serde(default)]
    pub password: String,
}

// Resposta de autenticação com o token
#[derive(Debug, Serialize, Deserialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: UserDto,
}

// Estrutura de dados ("claims") dentro do JWT
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,        // Subject (ID do usuário, como texto)
    pub name: String,       // Nome de usuário
    #[serde(default)]
    pub roles: Vec<String>, // Cargos no momento do login
    pub exp: usize,         // Expiration time (quando o token expira)
    pub iat: usize,         // Issued At (quando o token foi criado)
}
