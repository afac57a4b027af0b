mod export_service_test;
