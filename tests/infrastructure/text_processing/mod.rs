mod composite_file_loader_test;
mod docx_adapter_test;
mod plain_text_adapter_test;
mod text_sanitizer_test;
