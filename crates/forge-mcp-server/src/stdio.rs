// SPDX-FileCopyrightText: 2026 Session Forge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Newline-delimited JSON-RPC over stdin/stdout.
//!
//! One message per line; each is handled to completion before the next is
//! read. Only protocol messages go to stdout.

use forge_core::ForgeError;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};
use tracing::{debug, info};

use crate::server::{McpServer, SERVER_NAME, SERVER_VERSION};

fn io_error(e: std::io::Error) -> ForgeError {
    ForgeError::Internal(format!("stdio transport: {e}"))
}

/// Serve `reader` until EOF, writing replies to `writer`.
pub async fn serve<R, W>(server: &McpServer, reader: R, mut writer: W) -> Result<(), ForgeError>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut lines = reader.lines();
    while let Some(line) = lines.next_line().await.map_err(io_error)? {
        let raw = line.trim();
        if raw.is_empty() {
            continue;
        }
        if let Some(reply) = server.handle_line(raw).await {
            let mut out = serde_json::to_vec(&reply)?;
            out.push(b'\n');
            writer.write_all(&out).await.map_err(io_error)?;
            writer.flush().await.map_err(io_error)?;
        }
    }
    debug!("input closed");
    Ok(())
}

/// Serve the process's stdin/stdout.
pub async fn run_stdio(server: &McpServer) -> Result<(), ForgeError> {
    info!(
        name = SERVER_NAME,
        version = SERVER_VERSION,
        tools = server.registry().len(),
        "serving MCP over stdio"
    );
    serve(server, BufReader::new(tokio::io::stdin()), tokio::io::stdout()).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tool::ToolRegistry;
    use serde_json::Value;

    #[tokio::test]
    async fn replies_one_line_per_request_and_skips_notifications() {
        let server = McpServer::new(ToolRegistry::new());
        let input = concat!(
            r#"{"jsonrpc":"2.0","id":1,"method":"ping"}"#,
            "\n\n",
            r#"{"jsonrpc":"2.0","method":"notifications/initialized"}"#,
            "\n",
            r#"{"jsonrpc":"2.0","id":2,"method":"tools/list"}"#,
            "\n",
        );
        let mut output = Vec::new();
        serve(&server, input.as_bytes(), &mut output).await.unwrap();

        let replies: Vec<Value> = String::from_utf8(output)
            .unwrap()
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect();
        assert_eq!(replies.len(), 2);
        assert_eq!(replies[0]["id"], 1);
        assert_eq!(replies[1]["result"]["tools"], serde_json::json!([]));
    }
}
