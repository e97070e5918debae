use crate::types::{AssetRole, ResolverConfig, ResolverError};
use soroban_sdk::{contracttype, Address, Env, Map};

#[contracttype]
pub enum DataKey {
    Config,
    Roles,
}

pub struct Storage;

impl Storage {
    pub fn has_config(env: &Env) -> bool {
        env.storage().instance().has(&DataKey::Config)
    }

    /// Writes the config together with its role table. Both are immutable
    /// afterwards.
    pub fn set_config(env: &Env, config: &ResolverConfig, roles: &Map<Address, AssetRole>) {
        let storage = env.storage().instance();
        storage.set(&DataKey::Roles, roles);
        storage.set(&DataKey::Config, config);
    }

    pub fn get_config(env: &Env) -> Result<ResolverConfig, ResolverError> {
        env.storage()
            .instance()
            .get(&DataKey::Config)
            .ok_or(ResolverError::NotInitialized)
    }

    pub fn get_roles(env: &Env) -> Result<Map<Address, AssetRole>, ResolverError> {
        env.storage()
            .instance()
            .get(&DataKey::Roles)
            .ok_or(ResolverError::NotInitialized)
    }
}
