pub mod provider_disk;
pub mod provider_embed;
