//! Stdio plugin server
//!
//! Speaks line-delimited JSON-RPC 2.0 with the launcher. Each request runs
//! against a fresh [`MemoryHost`]; whatever the controller published is
//! turned into the response, and clipboard writes go out first as
//! `clipboard/set` notifications.

use std::io::{BufRead, BufReader, Write};

use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::{debug, warn};

use super::controller::Recall;
use super::host::MemoryHost;
use super::item::Item;
use super::jsonrpc::*;
use crate::config::SettingsSource;

/// Errors reported back to the launcher
#[derive(Debug, thiserror::Error)]
pub enum ProtocolError {
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Method not found: {0}")]
    MethodNotFound(String),

    #[error("Invalid params: {0}")]
    InvalidParams(#[from] serde_json::Error),
}

impl ProtocolError {
    pub fn code(&self) -> i64 {
        match self {
            Self::InvalidRequest(_) => INVALID_REQUEST,
            Self::MethodNotFound(_) => METHOD_NOT_FOUND,
            Self::InvalidParams(_) => INVALID_PARAMS,
        }
    }

    /// Decoder position for invalid params
    pub fn data(&self) -> Option<Value> {
        match self {
            Self::InvalidParams(e) => Some(json!({
                "category": format!("{:?}", e.classify()).to_lowercase(),
                "line": e.line(),
                "column": e.column(),
            })),
            _ => None,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct SuggestParams {
    #[serde(default)]
    input: String,
    #[serde(default)]
    chain: Vec<Item>,
}

#[derive(Debug, Default, Deserialize)]
struct ExecuteParams {
    #[serde(default)]
    item: Option<Item>,
    #[serde(default)]
    action: Option<String>,
}

fn parse_params<T: Default + DeserializeOwned>(params: &Value) -> Result<T, ProtocolError> {
    if params.is_null() {
        return Ok(T::default());
    }
    Ok(serde_json::from_value(params.clone())?)
}

/// Plugin server state
pub struct PluginServer {
    recall: Recall,
    settings: SettingsSource,
    started: bool,
}

impl PluginServer {
    pub fn new(settings: SettingsSource) -> Self {
        let config = settings.load_or_default();
        Self {
            recall: Recall::new(&config),
            settings,
            started: false,
        }
    }

    pub fn recall(&self) -> &Recall {
        &self.recall
    }

    /// Handle a JSON-RPC request
    pub fn handle_request(
        &mut self,
        request: &JsonRpcRequest,
        host: &mut MemoryHost,
    ) -> Option<JsonRpcResponse> {
        let result = if request.jsonrpc != "2.0" {
            Err(ProtocolError::InvalidRequest(format!(
                "unsupported jsonrpc version {:?}",
                request.jsonrpc
            )))
        } else {
            self.dispatch(&request.method, &request.params, host)
        };

        // Notifications (no id) don't get responses
        let Some(id) = request.id.clone() else {
            if let Err(e) = result {
                warn!("Notification {} failed: {}", request.method, e);
            }
            return None;
        };

        Some(match result {
            Ok(value) => JsonRpcResponse::success(id, value),
            Err(e) => JsonRpcResponse::error_with_data(id, e.code(), e.to_string(), e.data()),
        })
    }

    fn dispatch(
        &mut self,
        method: &str,
        params: &Value,
        host: &mut MemoryHost,
    ) -> Result<Value, ProtocolError> {
        match method {
            "start" => Ok(self.handle_start()),
            "catalog" => Ok(self.handle_catalog(host)),
            "suggest" => self.handle_suggest(params, host),
            "execute" => self.handle_execute(params, host),
            "settings_changed" => Ok(self.handle_settings_changed(host)),
            "ping" => Ok(json!({})),
            _ => Err(ProtocolError::MethodNotFound(method.to_string())),
        }
    }

    fn ensure_started(&mut self) {
        if !self.started {
            let config = self.settings.load_or_default();
            self.recall.on_start(&config);
            self.started = true;
        }
    }

    fn handle_start(&mut self) -> Value {
        self.started = false;
        self.ensure_started();
        json!({
            "name": "recall",
            "version": env!("CARGO_PKG_VERSION"),
            "keyword": self.recall.keyword(),
        })
    }

    fn handle_catalog(&mut self, host: &mut MemoryHost) -> Value {
        self.ensure_started();
        self.recall.on_catalog(host);
        json!({ "items": host.catalog })
    }

    fn handle_suggest(
        &mut self,
        params: &Value,
        host: &mut MemoryHost,
    ) -> Result<Value, ProtocolError> {
        let params: SuggestParams = parse_params(params)?;
        self.ensure_started();
        self.recall.on_suggest(host, &params.input, &params.chain);
        Ok(json!({ "items": host.suggestions, "sort": "none" }))
    }

    fn handle_execute(
        &mut self,
        params: &Value,
        host: &mut MemoryHost,
    ) -> Result<Value, ProtocolError> {
        let params: ExecuteParams = parse_params(params)?;
        self.ensure_started();
        self.recall
            .on_execute(host, params.item.as_ref(), params.action.as_deref());
        Ok(json!({}))
    }

    fn handle_settings_changed(&mut self, host: &mut MemoryHost) -> Value {
        let config = self.settings.load_or_default();
        self.recall.on_settings_changed(host, &config);
        self.started = true;
        json!({ "items": host.catalog })
    }

    /// Serve requests until the reader is exhausted
    pub fn serve<R: BufRead, W: Write>(&mut self, reader: R, mut writer: W) -> anyhow::Result<()> {
        for line in reader.lines() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }

            debug!("Received: {}", preview(&line));

            let request: JsonRpcRequest = match serde_json::from_str(&line) {
                Ok(req) => req,
                Err(e) => {
                    let response =
                        JsonRpcResponse::error(Value::Null, PARSE_ERROR, format!("Parse error: {}", e));
                    writeln!(writer, "{}", serde_json::to_string(&response)?)?;
                    writer.flush()?;
                    continue;
                }
            };

            let mut host = MemoryHost::new();
            let response = self.handle_request(&request, &mut host);

            for text in &host.clipboard {
                let notification = JsonRpcNotification::new("clipboard/set", json!({ "text": text }));
                writeln!(writer, "{}", serde_json::to_string(&notification)?)?;
            }

            if let Some(response) = response {
                let json = serde_json::to_string(&response)?;
                debug!("Sending: {}", preview(&json));
                writeln!(writer, "{}", json)?;
            }
            writer.flush()?;
        }

        Ok(())
    }
}

fn preview(line: &str) -> String {
    line.chars().take(100).collect()
}

/// Run the plugin on stdin/stdout
pub fn run_plugin_server(settings: SettingsSource) -> anyhow::Result<()> {
    debug!("recall plugin server starting...");

    let mut server = PluginServer::new(settings);

    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    server.serve(BufReader::new(stdin.lock()), stdout.lock())?;

    debug!("recall plugin server stopping.");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn server() -> Result<(TempDir, PluginServer)> {
        let dir = tempfile::tempdir()?;
        let config_path = dir.path().join("recall.toml");
        std::fs::write(&config_path, "")?;
        let settings = SettingsSource::new(
            Some(config_path),
            Some(dir.path().join("facts.db")),
        );
        Ok((dir, PluginServer::new(settings)))
    }

    fn run(server: &mut PluginServer, input: &str) -> Result<Vec<Value>> {
        let mut out = Vec::new();
        server.serve(input.as_bytes(), &mut out)?;
        String::from_utf8(out)?
            .lines()
            .map(|line| serde_json::from_str::<Value>(line).map_err(anyhow::Error::from))
            .collect()
    }

    #[test]
    fn test_start_and_catalog() -> Result<()> {
        let (_dir, mut server) = server()?;

        let out = run(
            &mut server,
            concat!(
                r#"{"jsonrpc":"2.0","id":1,"method":"start"}"#,
                "\n\n",
                r#"{"jsonrpc":"2.0","id":2,"method":"catalog"}"#,
                "\n"
            ),
        )?;

        assert_eq!(out.len(), 2);
        assert_eq!(out[0]["result"]["keyword"], "fact");
        assert_eq!(out[1]["id"], 2);
        assert_eq!(out[1]["result"]["items"][0]["category"], "keyword");
        assert_eq!(out[1]["result"]["items"][0]["target"], "fact");
        Ok(())
    }

    #[test]
    fn test_suggest_root() -> Result<()> {
        let (_dir, mut server) = server()?;
        let request = json!({
            "jsonrpc": "2.0",
            "id": 1,
            "method": "suggest",
            "params": {
                "input": "",
                "chain": [Item::keyword("fact", "Recall...", "Copy to clipboard")],
            }
        });

        let out = run(
            &mut server,
            &format!("{}\n{}\n", r#"{"jsonrpc":"2.0","id":0,"method":"catalog"}"#, request),
        )?;

        let items = out[1]["result"]["items"].as_array().cloned().unwrap_or_default();
        assert_eq!(items.len(), 6);
        assert_eq!(items[0]["label"], "Add Entry");
        assert_eq!(items[1]["label"], "Delete Entry");
        assert_eq!(items[2]["category"], "fact");
        assert_eq!(out[1]["result"]["sort"], "none");
        Ok(())
    }

    #[test]
    fn test_suggest_foreign_chain_is_null() -> Result<()> {
        let (_dir, mut server) = server()?;
        let request = json!({
            "jsonrpc": "2.0",
            "id": 1,
            "method": "suggest",
            "params": { "input": "x", "chain": [Item::keyword("calc", "Calculator", "")] }
        });

        let out = run(&mut server, &format!("{}\n", request))?;

        assert!(out[0]["result"]["items"].is_null());
        Ok(())
    }

    #[test]
    fn test_suggest_empty_chain_is_root() -> Result<()> {
        let (_dir, mut server) = server()?;
        let out = run(
            &mut server,
            concat!(
                r#"{"jsonrpc":"2.0","id":0,"method":"catalog"}"#,
                "\n",
                r#"{"jsonrpc":"2.0","id":1,"method":"suggest","params":{"input":"","chain":[]}}"#,
                "\n",
            ),
        )?;

        let items = out[1]["result"]["items"].as_array().cloned().unwrap_or_default();
        assert_eq!(items.len(), 6);
        assert_eq!(items[0]["label"], "Add Entry");
        assert_eq!(items[1]["label"], "Delete Entry");
        assert_eq!(items[5]["label"], "Licence Plate Number");
        Ok(())
    }

    #[test]
    fn test_execute_fact_sends_clipboard_first() -> Result<()> {
        let (_dir, mut server) = server()?;
        let request = json!({
            "jsonrpc": "2.0",
            "id": 7,
            "method": "execute",
            "params": { "item": Item::fact(&crate::core::Fact::new("Pin", "1234")) }
        });

        let out = run(&mut server, &format!("{}\n", request))?;

        assert_eq!(out.len(), 2);
        assert_eq!(out[0]["method"], "clipboard/set");
        assert_eq!(out[0]["params"]["text"], "1234");
        assert!(out[0].get("id").is_none());
        assert_eq!(out[1]["id"], 7);
        Ok(())
    }

    #[test]
    fn test_execute_save_persists() -> Result<()> {
        let (dir, mut server) = server()?;
        let request = json!({
            "jsonrpc": "2.0",
            "id": 1,
            "method": "execute",
            "params": { "item": Item::save("Pet Name", "Rex"), "action": null }
        });

        run(&mut server, &format!("{}\n", request))?;

        let store = crate::core::FactStore::new(dir.path().join("facts.db"));
        assert!(store
            .try_list_all()?
            .contains(&crate::core::Fact::new("Pet Name", "Rex")));
        assert_eq!(server.recall().facts().len(), 5);
        Ok(())
    }

    #[test]
    fn test_execute_without_item_is_noop() -> Result<()> {
        let (_dir, mut server) = server()?;
        let out = run(
            &mut server,
            "{\"jsonrpc\":\"2.0\",\"id\":1,\"method\":\"execute\",\"params\":{\"item\":null}}\n",
        )?;
        assert_eq!(out.len(), 1);
        assert!(out[0]["result"].is_object());
        Ok(())
    }

    #[test]
    fn test_errors() -> Result<()> {
        let (_dir, mut server) = server()?;
        let out = run(
            &mut server,
            concat!(
                "not json\n",
                r#"{"jsonrpc":"2.0","id":1,"method":"frobnicate"}"#,
                "\n",
                r#"{"jsonrpc":"2.0","id":2,"method":"suggest","params":{"chain":"nope"}}"#,
                "\n",
                r#"{"jsonrpc":"1.0","id":3,"method":"ping"}"#,
                "\n",
            ),
        )?;

        assert_eq!(out[0]["error"]["code"], PARSE_ERROR);
        assert_eq!(out[1]["error"]["code"], METHOD_NOT_FOUND);
        assert_eq!(out[2]["error"]["code"], INVALID_PARAMS);
        assert_eq!(out[2]["error"]["data"]["category"], "data");
        assert!(out[1]["error"].get("data").is_none());
        assert_eq!(out[3]["error"]["code"], INVALID_REQUEST);
        Ok(())
    }

    #[test]
    fn test_notifications_get_no_response() -> Result<()> {
        let (_dir, mut server) = server()?;
        let out = run(
            &mut server,
            concat!(
                r#"{"jsonrpc":"2.0","method":"settings_changed"}"#,
                "\n",
                r#"{"jsonrpc":"2.0","method":"unknown"}"#,
                "\n",
            ),
        )?;
        assert!(out.is_empty());
        assert_eq!(server.recall().facts().len(), 4);
        Ok(())
    }

    #[test]
    fn test_settings_changed_rereads_config() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let config_path = dir.path().join("recall.toml");
        let first = dir.path().join("first.db");
        let second = dir.path().join("second.db");
        let write_config = |db: &PathBuf, keyword: &str| {
            std::fs::write(
                &config_path,
                format!(
                    "[main]\ndatabase_file = {:?}\n[plugin]\nkeyword = {:?}\n",
                    db.display().to_string(),
                    keyword
                ),
            )
        };

        write_config(&first, "fact")?;
        let mut server = PluginServer::new(SettingsSource::new(Some(config_path.clone()), None));
        run(&mut server, "{\"jsonrpc\":\"2.0\",\"id\":1,\"method\":\"start\"}\n")?;
        assert!(first.exists());

        write_config(&second, "kv")?;
        let out = run(
            &mut server,
            "{\"jsonrpc\":\"2.0\",\"id\":2,\"method\":\"settings_changed\"}\n",
        )?;

        assert!(second.exists());
        assert_eq!(out[0]["result"]["items"][0]["target"], "kv");
        Ok(())
    }
}
