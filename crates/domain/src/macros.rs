/// 数値ベースの ID 型を定義する宣言型マクロ
///
/// ホストプラットフォームのコメント・投稿・ユーザーは整数の主キーを持つため、
/// `i64` をラップした Newtype を生成する:
/// - `derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)`
/// - `new()`: 既存の値から ID を作成
/// - `as_i64()`: 内部の値を取得
///
/// # 使用例
///
/// ```rust
/// use modnotify_domain::comment::CommentId;
///
/// let id = CommentId::new(42);
/// assert_eq!(id.as_i64(), 42);
/// assert_eq!(id.to_string(), "42");
/// ```
macro_rules! define_numeric_id {
    (
        $(#[$meta:meta])*
        $vis:vis struct $Name:ident;
    ) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, Hash,
            serde::Serialize, serde::Deserialize,
            derive_more::Display,
        )]
        #[display("{_0}")]
        #[serde(transparent)]
        $vis struct $Name(i64);

        impl $Name {
            /// 既存の値から ID を作成する
            pub fn new(value: i64) -> Self {
                Self(value)
            }

            /// 内部の値を取得する
            pub fn as_i64(&self) -> i64 {
                self.0
            }
        }
    };
}
