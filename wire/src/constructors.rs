//! Numeric tags naming the message types carried inside envelopes.
//!
//! The server addresses every message by one of these 64-bit constructors.
//! Nothing in the protocol depends on the particular values, only on their
//! distinctness and stability.

pub const SYSTEM_GET_SERVER_TIME: i64 = 146_511_289;
pub const SYSTEM_GET_INFO: i64 = 1_861_523_233;
pub const SYSTEM_GET_SALTS: i64 = 2_109_326_566;

pub const INIT_CONNECT: i64 = 4_150_793_517;
pub const INIT_RESPONSE: i64 = 3_188_015_450;
pub const INIT_COMPLETE_AUTH: i64 = 1_583_178_320;
pub const INIT_COMPLETE_AUTH_INTERNAL: i64 = 2_360_748_566;
pub const INIT_AUTH_COMPLETED: i64 = 627_708_982;

pub const MESSAGE_ENVELOPE: i64 = 535_232_465;
pub const MESSAGE_CONTAINER: i64 = 1_972_016_308;
pub const UPDATE_CONTAINER: i64 = 661_712_615;
pub const PROTO_MESSAGE: i64 = 2_179_260_159;
pub const PROTO_ENCRYPTED_PAYLOAD: i64 = 2_074_613_139;

pub const PASSWORD_ALGORITHM_VER6A: i64 = 341_860_043;
pub const ACCOUNT_PASSWORD: i64 = 513_301_545;
pub const INPUT_PASSWORD: i64 = 2_368_858_522;

pub const ERROR: i64 = 2_619_118_453;
