//! JSON-RPC and LSP error code constants.
//!
//! The values are fixed by the protocols; handlers pick from this registry
//! rather than inventing codes.

/// Invalid JSON was received by the server.
pub const PARSE_ERROR: i64 = -32700;

/// The JSON sent is not a valid request object.
pub const INVALID_REQUEST: i64 = -32600;

/// The method does not exist or is not available.
pub const METHOD_NOT_FOUND: i64 = -32601;

/// The method parameters are invalid.
pub const INVALID_PARAMS: i64 = -32602;

/// Internal JSON-RPC error.
pub const INTERNAL_ERROR: i64 = -32603;

/// Start of the range reserved for implementation-defined server errors.
pub const SERVER_ERROR_START: i64 = -32099;

/// A request arrived before the server completed initialisation.
pub const SERVER_NOT_INITIALIZED: i64 = -32002;

/// Failure that does not fit any other registered code.
pub const UNKNOWN_ERROR_CODE: i64 = -32001;

/// End of the range reserved by the JSON-RPC specification.
pub const JSONRPC_RESERVED_ERROR_RANGE_END: i64 = -32000;

/// End of the range reserved for implementation-defined server errors.
pub const SERVER_ERROR_END: i64 = -32800;

/// Start of the range reserved by the LSP specification.
pub const LSP_RESERVED_ERROR_RANGE_START: i64 = -32899;

/// The document was modified while the request was in flight.
pub const CONTENT_MODIFIED: i64 = -32801;

/// The client cancelled the request.
pub const REQUEST_CANCELLED: i64 = -32800;
