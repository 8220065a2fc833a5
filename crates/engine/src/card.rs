use attest_lens_records::Asset;
use serde::Serialize;

/// Label used when an asset does not declare its token standard
pub const UNKNOWN_STANDARD: &str = "Unknown";

const TOKEN_STANDARDS: &[(&str, &str)] = &[
    (
        "ERC-20",
        "https://ethereum.org/en/developers/docs/standards/tokens/erc-20/",
    ),
    (
        "ERC-721",
        "https://ethereum.org/en/developers/docs/standards/tokens/erc-721/",
    ),
    ("SPL", "https://spl.solana.com/token"),
    ("SToken-2022", "https://spl.solana.com/token-2022"),
];

/// Card face around which the badge ring is drawn
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AssetCard {
    pub name: String,
    pub ticker: Option<String>,
    pub issuer: Option<String>,
    pub image: Option<String>,
    pub chain_logo: Option<String>,
    pub blockchain: Option<String>,
    pub token_standard: String,
    pub token_standard_url: String,
}

impl AssetCard {
    #[must_use]
    pub fn for_asset(asset: &Asset) -> Self {
        let standard = asset
            .token_standard
            .clone()
            .unwrap_or_else(|| UNKNOWN_STANDARD.to_string());
        let url = token_standard_url(&standard);
        Self {
            name: asset.name.clone(),
            ticker: asset.ticker.clone(),
            issuer: asset.issuer.clone(),
            image: asset.asset_image.clone(),
            chain_logo: asset.blockchain_logo.clone(),
            blockchain: asset.blockchain.clone(),
            token_standard: standard,
            token_standard_url: url,
        }
    }
}

/// Reference page for a token standard, or a web search for unknown ones
#[must_use]
pub fn token_standard_url(standard: &str) -> String {
    TOKEN_STANDARDS
        .iter()
        .find(|(name, _)| *name == standard)
        .map_or_else(
            || format!("https://google.com/search?q={standard}+token+standard"),
            |(_, url)| (*url).to_string(),
        )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_standard_links_to_reference() {
        let asset = Asset::named("Acme Bond")
            .token_standard("SPL")
            .blockchain("Solana");
        let card = AssetCard::for_asset(&asset);
        assert_eq!(card.blockchain.as_deref(), Some("Solana"));
        assert_eq!(card.token_standard, "SPL");
        assert_eq!(card.token_standard_url, "https://spl.solana.com/token");
    }

    #[test]
    fn test_missing_standard_is_unknown() {
        let card = AssetCard::for_asset(&Asset::named("Acme Bond"));
        assert_eq!(card.token_standard, UNKNOWN_STANDARD);
        assert_eq!(
            card.token_standard_url,
            "https://google.com/search?q=Unknown+token+standard"
        );
    }
}
