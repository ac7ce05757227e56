use crate::commands::{AgendaPaths, CmdMessage, CmdResult};
use crate::config::AgendaConfig;
use crate::error::Result;

#[derive(Debug, Clone)]
pub enum ConfigAction {
    ShowAll,
    ShowKey(String),
    Set(String, String),
}

pub fn run(paths: &AgendaPaths, action: ConfigAction) -> Result<CmdResult> {
    match action {
        ConfigAction::ShowAll => {
            let config = AgendaConfig::load(&paths.home)?;
            Ok(CmdResult::default().with_config(config))
        }
        ConfigAction::ShowKey(key) => {
            let config = AgendaConfig::load(&paths.home)?;
            let mut result = CmdResult::default();
            match config.get(&key) {
                Some(val) => result.add_message(CmdMessage::info(val)),
                None => {
                    result.add_message(CmdMessage::error(format!("Unknown config key: {}", key)))
                }
            }
            Ok(result)
        }
        ConfigAction::Set(key, value) => {
            let mut config = AgendaConfig::load(&paths.home)?;
            if let Err(e) = config.set(&key, &value) {
                let mut result = CmdResult::default();
                result.add_message(CmdMessage::error(e));
                return Ok(result);
            }
            config.save(&paths.home)?;
            let display_val = config.get(&key).unwrap_or_else(|| value.clone());
            let mut result = CmdResult::default().with_config(config);
            result.add_message(CmdMessage::success(format!("{} set to {}", key, display_val)));
            Ok(result)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ListOrder;

    #[test]
    fn set_then_show() {
        let dir = tempfile::tempdir().unwrap();
        let paths = AgendaPaths::new(dir.path());

        let set = run(
            &paths,
            ConfigAction::Set("list-order".into(), "text".into()),
        )
        .unwrap();
        assert_eq!(set.config.unwrap().list_order, ListOrder::Text);

        let shown = run(&paths, ConfigAction::ShowKey("list-order".into())).unwrap();
        assert_eq!(shown.messages[0].content, "text");
    }

    #[test]
    fn unknown_key_reports_error_without_saving() {
        let dir = tempfile::tempdir().unwrap();
        let paths = AgendaPaths::new(dir.path());

        let result = run(&paths, ConfigAction::Set("colour".into(), "red".into())).unwrap();
        assert!(result.has_errors());
        assert!(!dir.path().join("config.json").exists());
    }

    #[test]
    fn show_all_returns_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let result = run(&AgendaPaths::new(dir.path()), ConfigAction::ShowAll).unwrap();
        assert_eq!(result.config, Some(AgendaConfig::default()));
    }
}
