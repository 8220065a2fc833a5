use clap::ValueEnum;

use attest_lens_engine::OnchainFilter;

#[derive(Copy, Clone, ValueEnum)]
pub(crate) enum OnchainFlag {
    All,
    Onchain,
    Offchain,
}

impl OnchainFlag {
    pub(crate) const fn as_domain(self) -> OnchainFilter {
        match self {
            OnchainFlag::All => OnchainFilter::All,
            OnchainFlag::Onchain => OnchainFilter::Onchain,
            OnchainFlag::Offchain => OnchainFilter::Offchain,
        }
    }
}
