// smart-contracts/src/fixtures.rs

//! Compiled fixture contracts (solc 0.6.6) and their method selectors.

pub const SIMPLE_STORAGE: &str = "SimpleStorage";
pub const LOG_EVENTS: &str = "LogEvents";
pub const SELF_DESTRUCT: &str = "SelfDestruct";

/// `set(uint256)` / `get()` over a single storage slot.
pub const SIMPLE_STORAGE_BIN: &str = "60806040525b607b60006000508190909055505b610018565b60db806100266000396000f3fe60806040526004361060295760003560e01c806360fe47b114602f5780636d4ce63c14605b576029565b60006000fd5b60596004803603602081101560445760006000fd5b81019080803590602001909291905050506084565b005b34801560675760006000fd5b50606e6094565b6040518082815260200191505060405180910390f35b8060006000508190909055505b50565b6000600060005054905060a2565b9056fea26469706673582212204e58804e375d4a732a7b67cce8d8ffa904fa534d4555e655a433ce0a5e0d339f64736f6c63430006060033";

/// Emits an event from the constructor and from `log()`.
pub const LOG_EVENTS_BIN: &str = "60806040525b3373ffffffffffffffffffffffffffffffffffffffff167f33b708096f325a28269900b1f9361f84aa77ba6ca085f6b114e4a070a8239d5234600160405180838152602001821515151581526020019250505060405180910390a25b610066565b60c1806100746000396000f3fe608060405260043610601f5760003560e01c806351973ec914602557601f565b60006000fd5b602b602d565b005b3373ffffffffffffffffffffffffffffffffffffffff167f33b708096f325a28269900b1f9361f84aa77ba6ca085f6b114e4a070a8239d5234600060405180838152602001821515151581526020019250505060405180910390a25b56fea2646970667358221220febe0ec5c064e995607c65adef058679ddef92d16e1fff35675fc3505f8f6b4564736f6c63430006060033";

/// Stores a beneficiary in the constructor; `done()` self-destructs to it.
pub const SELF_DESTRUCT_BIN: &str = "608060405260405161013c38038061013c833981810160405260208110156100275760006000fd5b81019080805190602001909291905050505b80600060006101000a81548173ffffffffffffffffffffffffffffffffffffffff021916908373ffffffffffffffffffffffffffffffffffffffff1602179055505b50610081565b60ad8061008f6000396000f3fe608060405234801560105760006000fd5b5060043610602c5760003560e01c8063ae8421e114603257602c565b60006000fd5b6038603a565b005b600060009054906101000a900473ffffffffffffffffffffffffffffffffffffffff1673ffffffffffffffffffffffffffffffffffffffff16ff5b56fea2646970667358221220ead2c0723dcc5bc6fe1848ffcc748528c4f0638575fdee75e2c972c60fa1ea2d64736f6c63430006060033";

/// ABI-encoded beneficiary passed to the `SelfDestruct` constructor.
pub const SELF_DESTRUCT_BENEFICIARY_ARG: &str =
    "000000000000000000000000b2e61ff569acf041b3c2c17724e2379c581eeac3";

pub const SET_SELECTOR: &str = "0x60fe47b1";
pub const GET_SELECTOR: &str = "0x6d4ce63c";
pub const LOG_SELECTOR: &str = "0x51973ec9";
pub const DONE_SELECTOR: &str = "0xae8421e1";

/// `set(0xd10)`
pub const SET_0XD10: &str =
    "0x60fe47b10000000000000000000000000000000000000000000000000000000000000d10";
/// `set(0xccc)`
pub const SET_0XCCC: &str =
    "0x60fe47b10000000000000000000000000000000000000000000000000000000000000ccc";

/// Value `get()` must report after the simple-storage script has run.
pub const SIMPLE_STORAGE_FINAL_VALUE: u64 = 0xccc;
