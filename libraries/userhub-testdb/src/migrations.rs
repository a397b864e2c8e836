//! Liquibase invocation

use std::net::IpAddr;

/// Properties file baked into the migration image by its Dockerfile
pub(crate) const DEFAULTS_FILE: &str = "/liquibase/changelog/liquibase.docker.properties";

/// Root changelog, resolved against the image's search path
pub(crate) const CHANGELOG_FILE: &str = "changelog.xml";

/// JDBC URL of the database as seen from inside the private network
pub(crate) fn jdbc_url(address: IpAddr, port: u16, database: &str) -> String {
    let host = match address {
        IpAddr::V4(v4) => v4.to_string(),
        IpAddr::V6(v6) => format!("[{v6}]"),
    };
    format!("jdbc:postgresql://{host}:{port}/{database}?sslmode=disable")
}

/// Arguments for `liquibase update` against `url`
pub(crate) fn update_args(url: &str, username: &str, password: &str) -> Vec<String> {
    [
        "update",
        "--defaults-file",
        DEFAULTS_FILE,
        "--url",
        url,
        "--username",
        username,
        "--password",
        password,
        "--changelog-file",
        CHANGELOG_FILE,
    ]
    .into_iter()
    .map(str::to_string)
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::{Ipv4Addr, Ipv6Addr};

    #[test]
    fn jdbc_url_targets_container_address() {
        let url = jdbc_url(IpAddr::V4(Ipv4Addr::new(172, 18, 0, 2)), 5432, "users");
        assert_eq!(url, "jdbc:postgresql://172.18.0.2:5432/users?sslmode=disable");
    }

    #[test]
    fn jdbc_url_brackets_ipv6() {
        let url = jdbc_url(IpAddr::V6(Ipv6Addr::LOCALHOST), 5432, "users");
        assert_eq!(url, "jdbc:postgresql://[::1]:5432/users?sslmode=disable");
    }

    #[test]
    fn update_args_point_at_changelog_and_credentials() {
        let args = update_args("jdbc:postgresql://db:5432/users", "user", "pass");

        assert_eq!(args[0], "update");
        let pairs: Vec<_> = args[1..].chunks(2).map(|c| (c[0].as_str(), c[1].as_str())).collect();
        assert_eq!(
            pairs,
            vec![
                ("--defaults-file", DEFAULTS_FILE),
                ("--url", "jdbc:postgresql://db:5432/users"),
                ("--username", "user"),
                ("--password", "pass"),
                ("--changelog-file", "changelog.xml"),
            ]
        );
    }
}
