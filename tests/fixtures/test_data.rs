// テストデータ作成ヘルパー

use std::fs;
use std::path::{Path, PathBuf};

/// 最小限の天鳳形式牌譜
pub const SAMPLE_MJLOG: &str = r#"<mjloggm ver="2.3"><SHUFFLE seed="mt19937ar-sha512-n288-base64,AAAA"/><GO type="169" lobby="0"/><UN n0="%E3%81%82" n1="b" n2="c" n3="d"/><INIT seed="0,0,0,1,2,3" ten="250,250,250,250" oya="0" hai0="0,1,2"/><AGARI ba="0,0" hai="0,1" who="0" fromWho="1" sc="250,10,250,-10,250,0,250,0"/></mjloggm>"#;

/// 切断イベントを含む牌譜
pub const BYE_MJLOG: &str =
    r#"<mjloggm ver="2.3"><INIT seed="0,0,0,1,2,3"/><BYE who="2"/><UN n2="c"/></mjloggm>"#;

/// 入力ディレクトリに牌譜ファイルを作成する
pub fn write_logs(dir: &Path, names: &[&str]) -> Vec<PathBuf> {
    names
        .iter()
        .map(|name| {
            let path = dir.join(name);
            fs::write(&path, SAMPLE_MJLOG).unwrap();
            path
        })
        .collect()
}

/// 連番の牌譜ファイルを作成する
pub fn write_numbered_logs(dir: &Path, count: usize) -> Vec<PathBuf> {
    let names: Vec<String> = (0..count)
        .map(|i| format!("2010010100gm-{i:04}.xml"))
        .collect();
    let refs: Vec<&str> = names.iter().map(String::as_str).collect();
    write_logs(dir, &refs)
}
