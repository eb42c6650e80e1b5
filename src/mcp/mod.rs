pub mod protocol;
pub mod server;

pub use protocol::{Request, Response, InitializeParams, InitializeResult, MCP_VERSION, SERVER_CAPABILITIES};
pub use server::{MCPServer, Server, ToolInfo};
