use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "ai-detect")]
#[command(about = "AI生成画像・ディープフェイク判定クライアント", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// 解析サーバーのURL（環境変数 AI_DETECT_SERVER・設定ファイルより優先）
    #[arg(long, global = true)]
    pub server: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// 画像をアップロードして解析
    Analyze {
        /// 画像ファイルのパス
        #[arg(required = true)]
        file: PathBuf,

        /// 結果をJSONで出力
        #[arg(long)]
        json: bool,

        /// 起動時の履歴読み込みをスキップ
        #[arg(long)]
        no_history: bool,
    },

    /// 最近の解析履歴を表示
    History {
        /// 取得件数（最大8）
        #[arg(short, long)]
        limit: Option<usize>,

        /// 指定番号の履歴を再表示
        #[arg(short, long)]
        select: Option<usize>,

        /// サーバーの代わりに history.jsonl を読む
        #[arg(short, long)]
        file: Option<PathBuf>,

        /// JSONで出力
        #[arg(long)]
        json: bool,
    },

    /// 履歴を対話的に選んで再表示
    Browse {
        /// サーバーの代わりに history.jsonl を読む
        #[arg(short, long)]
        file: Option<PathBuf>,
    },

    /// 内訳レポート（Diffusion/GAN）をパースして表示
    Report {
        /// レポートファイル（省略時は標準入力）
        input: Option<PathBuf>,

        /// JSONで出力
        #[arg(long)]
        json: bool,
    },

    /// 設定を表示/編集
    Config {
        /// 解析サーバーのURLを設定
        #[arg(long)]
        set_server: Option<String>,

        /// 設定を表示
        #[arg(long)]
        show: bool,
    },
}
