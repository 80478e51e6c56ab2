use crate::domain::models::{
    ldap::{LdapConfig, LdapConfigUpdate},
    settings::{GeneralSettings, SettingsUpdate, UserSettings},
    user::User,
};
use crate::domain::ports::SettingsRepository;
use crate::error::AppError;
use async_trait::async_trait;
use chrono::Utc;
use sqlx::SqlitePool;

const SETTINGS_COLUMNS: &str =
    "full_name, email, daily_goal, start_of_week, treat_saturday_as_holiday, enable_ai_insights, language";
const LDAP_COLUMNS: &str =
    "enabled, server_url, base_dn, bind_dn, bind_password, user_filter, group_base_dn, group_filter, role_mappings";

pub struct SqliteSettingsRepo {
    pool: SqlitePool,
}

impl SqliteSettingsRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    async fn ensure_user_row(&self, user: &User) -> Result<(), AppError> {
        sqlx::query(
            "INSERT INTO settings (user_id, full_name, email, updated_at) VALUES (?, ?, ?, ?)
             ON CONFLICT (user_id) DO NOTHING"
        )
            .bind(&user.id)
            .bind(&user.name)
            .bind(format!("{}@example.com", user.username))
            .bind(Utc::now())
            .execute(&self.pool)
            .await
            .map_err(AppError::Database)?;
        Ok(())
    }
}

#[async_trait]
impl SettingsRepository for SqliteSettingsRepo {
    async fn get_or_create_user_settings(&self, user: &User) -> Result<UserSettings, AppError> {
        self.ensure_user_row(user).await?;
        sqlx::query_as::<_, UserSettings>(&format!("SELECT {SETTINGS_COLUMNS} FROM settings WHERE user_id = ?"))
            .bind(&user.id)
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn upsert_user_settings(&self, user: &User, update: &SettingsUpdate) -> Result<UserSettings, AppError> {
        self.ensure_user_row(user).await?;
        sqlx::query_as::<_, UserSettings>(&format!(
            "UPDATE settings SET
                full_name = COALESCE(?, full_name),
                email = COALESCE(?, email),
                daily_goal = COALESCE(?, daily_goal),
                start_of_week = COALESCE(?, start_of_week),
                treat_saturday_as_holiday = COALESCE(?, treat_saturday_as_holiday),
                enable_ai_insights = COALESCE(?, enable_ai_insights),
                language = COALESCE(?, language),
                updated_at = ?
             WHERE user_id = ?
             RETURNING {SETTINGS_COLUMNS}"
        ))
            .bind(&update.full_name)
            .bind(&update.email)
            .bind(update.daily_goal)
            .bind(&update.start_of_week)
            .bind(update.treat_saturday_as_holiday)
            .bind(update.enable_ai_insights)
            .bind(&update.language)
            .bind(Utc::now())
            .bind(&user.id)
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn load_general(&self) -> Result<GeneralSettings, AppError> {
        sqlx::query_as::<_, GeneralSettings>("SELECT currency FROM general_settings WHERE id = 1")
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn update_general(&self, currency: &str) -> Result<GeneralSettings, AppError> {
        sqlx::query_as::<_, GeneralSettings>(
            "INSERT INTO general_settings (id, currency, updated_at) VALUES (1, ?, ?)
             ON CONFLICT (id) DO UPDATE SET currency = excluded.currency, updated_at = excluded.updated_at
             RETURNING currency"
        )
            .bind(currency)
            .bind(Utc::now())
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn load_ldap_config(&self) -> Result<LdapConfig, AppError> {
        sqlx::query_as::<_, LdapConfig>(&format!("SELECT {LDAP_COLUMNS} FROM ldap_config WHERE id = 1"))
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn update_ldap_config(&self, update: &LdapConfigUpdate) -> Result<LdapConfig, AppError> {
        let role_mappings = update
            .role_mappings
            .as_ref()
            .map(serde_json::to_string)
            .transpose()
            .map_err(|e| AppError::InternalWithMsg(format!("Role mappings serialization failed: {}", e)))?;

        sqlx::query_as::<_, LdapConfig>(&format!(
            "UPDATE ldap_config SET
                enabled = COALESCE(?, enabled),
                server_url = COALESCE(?, server_url),
                base_dn = COALESCE(?, base_dn),
                bind_dn = COALESCE(?, bind_dn),
                bind_password = COALESCE(?, bind_password),
                user_filter = COALESCE(?, user_filter),
                group_base_dn = COALESCE(?, group_base_dn),
                group_filter = COALESCE(?, group_filter),
                role_mappings = COALESCE(?, role_mappings),
                updated_at = ?
             WHERE id = 1
             RETURNING {LDAP_COLUMNS}"
        ))
            .bind(update.enabled)
            .bind(&update.server_url)
            .bind(&update.base_dn)
            .bind(&update.bind_dn)
            .bind(&update.bind_password)
            .bind(&update.user_filter)
            .bind(&update.group_base_dn)
            .bind(&update.group_filter)
            .bind(role_mappings)
            .bind(Utc::now())
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::Database)
    }
}
