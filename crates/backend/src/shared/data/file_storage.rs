use std::path::{Path, PathBuf};

use anyhow::Result;
use once_cell::sync::OnceCell;
use uuid::Uuid;

static UPLOADS_ROOT: OnceCell<PathBuf> = OnceCell::new();

/// Принимаются только PDF, не больше 16 МиБ
pub const MAX_FILE_SIZE: usize = 16 * 1024 * 1024;

/// Хранилище вложений: плоский каталог, имена файлов уникализируются
/// UUID-префиксом, в базе хранится относительный путь
pub fn initialize_file_storage(uploads_dir: &str) -> Result<()> {
    let root = PathBuf::from(uploads_dir);
    std::fs::create_dir_all(&root)?;
    UPLOADS_ROOT
        .set(root)
        .map_err(|_| anyhow::anyhow!("Failed to set UPLOADS_ROOT"))?;
    Ok(())
}

fn uploads_root() -> Result<&'static PathBuf> {
    UPLOADS_ROOT
        .get()
        .ok_or_else(|| anyhow::anyhow!("File storage has not been initialized"))
}

pub fn is_allowed_file(file_name: &str) -> bool {
    Path::new(file_name)
        .extension()
        .map(|ext| ext.eq_ignore_ascii_case("pdf"))
        .unwrap_or(false)
}

/// Убирает из имени файла всё, кроме последнего компонента пути
fn sanitize_file_name(file_name: &str) -> String {
    Path::new(file_name)
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "file.pdf".to_string())
}

/// Сохраняет вложение и возвращает имя файла в хранилище
pub fn save_file(original_name: &str, data: &[u8]) -> Result<String> {
    if !is_allowed_file(original_name) {
        anyhow::bail!("Разрешены только PDF файлы");
    }
    if data.len() > MAX_FILE_SIZE {
        anyhow::bail!("Файл превышает максимальный размер 16 МБ");
    }

    let stored_name = format!("{}_{}", Uuid::new_v4(), sanitize_file_name(original_name));
    let path = uploads_root()?.join(&stored_name);
    std::fs::write(&path, data)?;

    tracing::debug!("Saved attachment: {} ({} bytes)", stored_name, data.len());
    Ok(stored_name)
}

pub fn file_path(stored_name: &str) -> Result<PathBuf> {
    Ok(uploads_root()?.join(sanitize_file_name(stored_name)))
}

/// Удаляет вложение; отсутствие файла не считается ошибкой
pub fn delete_file(stored_name: &str) -> Result<()> {
    let path = file_path(stored_name)?;
    match std::fs::remove_file(&path) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e.into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pdf_extension_check_is_case_insensitive() {
        assert!(is_allowed_file("act.pdf"));
        assert!(is_allowed_file("act.PDF"));
        assert!(!is_allowed_file("act.docx"));
        assert!(!is_allowed_file("act"));
    }

    #[test]
    fn sanitize_strips_directories() {
        assert_eq!(sanitize_file_name("../../etc/passwd.pdf"), "passwd.pdf");
        assert_eq!(sanitize_file_name("act.pdf"), "act.pdf");
    }
}
