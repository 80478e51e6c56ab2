pub mod ldap_directory_service;
