use crate::features::expenses::models::{CreateExpenseDto, Expense, ExpenseStats};
use crate::features::expenses::summary;
use crate::shared::errors::{AppError, AppResult};
use crate::shared::utils::current_timestamp;
use chrono_tz::Tz;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

/// 経費データファイルを扱うストア
///
/// すべての操作はファイル全体の読み込み・書き込みで行う。
/// プロセス内での排他は呼び出し側（`AppState`のMutex）が担う。
#[derive(Debug, Clone)]
pub struct ExpenseStore {
    /// 経費データ（JSON配列）のパス
    path: PathBuf,
    /// 採番済みIDの最大値を保持するシーケンスファイルのパス
    sequence_path: PathBuf,
    /// タイムスタンプのタイムゾーン
    timezone: Tz,
}

impl ExpenseStore {
    /// ストアを作成する
    ///
    /// # 引数
    /// * `path` - 経費データファイルのパス
    /// * `timezone` - タイムスタンプに使用するタイムゾーン
    pub fn new<P: Into<PathBuf>>(path: P, timezone: Tz) -> Self {
        let path = path.into();
        let sequence_path = with_suffix(&path, ".seq");
        Self {
            path,
            sequence_path,
            timezone,
        }
    }

    /// 経費データファイルのパスを取得
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// シーケンスファイルのパスを取得
    pub fn sequence_path(&self) -> &Path {
        &self.sequence_path
    }

    /// 経費データを読み込む
    ///
    /// # 戻り値
    /// 経費のリスト（ファイルがない場合は空）、または解析失敗時はストレージエラー
    pub fn load(&self) -> AppResult<Vec<Expense>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }

        let contents = fs::read_to_string(&self.path)?;
        serde_json::from_str(&contents).map_err(|e| {
            AppError::storage(format!(
                "経費データの解析に失敗しました: {} ({e})",
                self.path.display()
            ))
        })
    }

    /// 経費データを保存する
    ///
    /// 一時ファイルに書き込んでから置き換えるため、読み込み側が
    /// 書きかけのファイルを見ることはない。
    ///
    /// # 引数
    /// * `expenses` - 保存する経費のリスト
    pub fn save(&self, expenses: &[Expense]) -> AppResult<()> {
        let json = serde_json::to_string_pretty(expenses)?;
        write_replacing(&self.path, json.as_bytes())
    }

    /// 経費を追加する
    ///
    /// # 引数
    /// * `dto` - 経費作成用DTO
    ///
    /// # 戻り値
    /// 作成された経費、または失敗時はエラー
    pub fn add(&self, dto: CreateExpenseDto) -> AppResult<Expense> {
        let new_expense = dto.validate()?;

        let mut expenses = self.load()?;
        let id = self.next_id(&expenses)?;
        let expense = new_expense.into_expense(id, current_timestamp(&self.timezone));

        expenses.push(expense.clone());
        self.save(&expenses)?;
        self.save_sequence(id)?;

        log::info!(
            "経費を追加しました: id={}, date={}, amount={}, category={}",
            expense.id,
            expense.date,
            expense.amount,
            expense.category
        );

        Ok(expense)
    }

    /// IDで経費を削除する
    ///
    /// 該当する経費がなくてもエラーにはしない。
    ///
    /// # 引数
    /// * `id` - 経費ID
    ///
    /// # 戻り値
    /// 経費を削除した場合はtrue
    pub fn delete_by_id(&self, id: i64) -> AppResult<bool> {
        let mut expenses = self.load()?;

        // 削除前の最大IDを記録し、削除したIDが再利用されないようにする
        let highest = self.highest_issued_id(&expenses)?;

        let before = expenses.len();
        expenses.retain(|expense| expense.id != id);
        let removed = expenses.len() != before;

        self.save(&expenses)?;
        self.save_sequence(highest)?;

        if removed {
            log::info!("経費を削除しました: id={id}");
        } else {
            log::debug!("削除対象の経費が存在しません: id={id}");
        }

        Ok(removed)
    }

    /// 経費一覧を取得する（登録順）
    pub fn list_all(&self) -> AppResult<Vec<Expense>> {
        self.load()
    }

    /// カテゴリ別の合計金額を取得する
    pub fn totals_by_category(&self) -> AppResult<BTreeMap<String, f64>> {
        Ok(summary::totals_by_category(&self.load()?))
    }

    /// 日付別の合計金額を日付順で取得する
    pub fn totals_by_date(&self) -> AppResult<Vec<(String, f64)>> {
        Ok(summary::totals_by_date(&self.load()?))
    }

    /// 統計情報を取得する
    pub fn stats(&self) -> AppResult<ExpenseStats> {
        Ok(summary::summarize(&self.load()?))
    }

    /// 次に採番するIDを求める
    fn next_id(&self, expenses: &[Expense]) -> AppResult<i64> {
        Ok(self.highest_issued_id(expenses)? + 1)
    }

    /// これまでに採番されたIDの最大値を求める
    ///
    /// シーケンスファイルがない既存データでも衝突しないよう、
    /// 保存されている経費の最大IDとの大きい方を使う。
    fn highest_issued_id(&self, expenses: &[Expense]) -> AppResult<i64> {
        let stored_max = expenses.iter().map(|expense| expense.id).max().unwrap_or(0);
        Ok(self.load_sequence()?.max(stored_max))
    }

    /// シーケンスファイルを読み込む（ない場合は0）
    fn load_sequence(&self) -> AppResult<i64> {
        if !self.sequence_path.exists() {
            return Ok(0);
        }

        let contents = fs::read_to_string(&self.sequence_path)?;
        contents.trim().parse::<i64>().map_err(|e| {
            AppError::storage(format!(
                "シーケンスファイルの解析に失敗しました: {} ({e})",
                self.sequence_path.display()
            ))
        })
    }

    /// シーケンスファイルを保存する
    fn save_sequence(&self, id: i64) -> AppResult<()> {
        write_replacing(&self.sequence_path, id.to_string().as_bytes())
    }
}

/// 一時ファイルに書き込んでから対象ファイルを置き換える
fn write_replacing(path: &Path, contents: &[u8]) -> AppResult<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent)?;
        }
    }

    let temp_path = with_suffix(path, ".tmp");
    fs::write(&temp_path, contents)?;
    fs::rename(&temp_path, path)?;
    Ok(())
}

/// ファイル名の末尾に接尾辞を付けたパスを返す（`trip.json` → `trip.json.seq`）
fn with_suffix(path: &Path, suffix: &str) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|name| name.to_os_string())
        .unwrap_or_default();
    name.push(suffix);
    path.with_file_name(name)
}
