use std::path::PathBuf;

pub fn get_path(dir: &str, file: &str) -> PathBuf {
    let mut buf = PathBuf::new();

    for chunk in [dir, "migration", "postgresql", file] {
        buf.push(chunk);
    }

    buf
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_path() {
        let path = get_path("/srv/app", "sync_data.sql");
        assert_eq!(
            path,
            PathBuf::from("/srv/app/migration/postgresql/sync_data.sql")
        );
    }
}
