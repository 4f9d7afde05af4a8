//! 撮り直しの対話入力
//!
//! 未検出・解析失敗のあとに、別の写真を指定して再スキャンするか尋ねる。

use crate::error::{MiamzError, Result};
use dialoguer::Input;
use std::path::PathBuf;

/// 対話アクション
#[derive(Debug, PartialEq, Eq)]
pub enum RetakeAction {
    /// 指定した写真で撮り直し
    Retake(PathBuf),
    /// 同じ写真でもう一度
    Again,
    /// 終了
    Quit,
}

/// 撮り直しプロンプト
pub fn prompt_retake() -> Result<RetakeAction> {
    let input: String = Input::new()
        .with_prompt("Reprendre ? (chemin d'une nouvelle photo, r : réessayer, q : quitter)")
        .allow_empty(true)
        .interact_text()
        .map_err(|e| MiamzError::Prompt(e.to_string()))?;

    Ok(parse_retake_input(&input))
}

fn parse_retake_input(input: &str) -> RetakeAction {
    match input.trim() {
        "" | "q" | "Q" => RetakeAction::Quit,
        "r" | "R" => RetakeAction::Again,
        path => RetakeAction::Retake(PathBuf::from(path)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_retake_input() {
        assert_eq!(parse_retake_input(""), RetakeAction::Quit);
        assert_eq!(parse_retake_input(" q "), RetakeAction::Quit);
        assert_eq!(parse_retake_input("r"), RetakeAction::Again);
        assert_eq!(
            parse_retake_input("photos/frigo2.jpg"),
            RetakeAction::Retake(PathBuf::from("photos/frigo2.jpg"))
        );
    }
}
