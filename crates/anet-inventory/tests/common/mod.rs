use assert_cmd::Command;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub const CACHE_FILE: &str = "ansible-atlantic_net.cache";

pub struct TestProject {
    pub root: TempDir,
}

impl TestProject {
    pub fn new() -> Self {
        let root = tempfile::tempdir().unwrap();
        Self { root }
    }

    pub fn path(&self) -> PathBuf {
        self.root.path().to_path_buf()
    }

    pub fn cache_path(&self) -> PathBuf {
        self.root.path().join(CACHE_FILE)
    }

    /// Command isolated from the caller's credentials and INI files
    pub fn command(&self) -> Command {
        #[allow(deprecated)]
        let mut cmd = Command::cargo_bin("anet_inventory").unwrap();
        cmd.current_dir(self.root.path())
            .env_remove("ANET_PUBLIC_KEY")
            .env_remove("ANET_PRIVATE_KEY")
            .env_remove("ANET_INI_PATH")
            .env_remove("RUST_LOG")
            .env("XDG_CONFIG_HOME", self.root.path().join("config"));
        cmd
    }

    /// Command with credentials on the command line
    pub fn authed_command(&self) -> Command {
        let mut cmd = self.command();
        cmd.args(["-a", "test-public", "-b", "test-private"]);
        cmd
    }

    pub fn write_ini(&self, content: &str) {
        fs::write(self.root.path().join("anet_inventory.ini"), content).unwrap();
    }

    pub fn write_cache(&self, content: &serde_json::Value) {
        write_json(&self.cache_path(), content);
    }

    pub fn read_cache(&self) -> String {
        fs::read_to_string(self.cache_path()).unwrap()
    }
}

fn write_json(path: &Path, content: &serde_json::Value) {
    fs::write(path, serde_json::to_string(content).unwrap()).unwrap();
}

/// A cache holding one cloudserver and one plan
pub fn sample_cache() -> serde_json::Value {
    serde_json::json!({
        "data": {
            "cloudservers": [{
                "id": 1,
                "name": "web1",
                "vm_ip_address": "10.0.0.1",
                "vm_image": "img-1",
                "vm_image_display_name": "Ubuntu 20.04",
                "vm_plan_name": "small",
                "vm_status": "active"
            }],
            "plans": [{"plan_name": "small", "num_cpu": "1"}]
        },
        "inventory": {}
    })
}
